use grabkit_cli::cli::subs;
use grabkit_core::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging as early as possible.
    logging::init();

    if let Err(err) = subs::run_from_args().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
