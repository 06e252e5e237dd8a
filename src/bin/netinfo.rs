use clap::Parser;
use persona_relay::netinfo::NetworkReport;

#[derive(Parser)]
#[clap(name = "netinfo")]
#[clap(about = "Print this machine's LAN address for testing the relay from other devices", long_about = None)]
struct Cli {
    /// Port shown in the LAN URL (the frontend's port)
    #[clap(short, long, default_value_t = 3000)]
    port: u16,

    /// Characters of interface details to print
    #[clap(short, long, default_value_t = 500)]
    max_chars: usize,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("{}", NetworkReport::collect(cli.port, cli.max_chars));
}
