use grabkit_cli::cli::grab;
use grabkit_core::exec::ExecError;
use grabkit_core::logging;

fn main() {
    // Initialize logging as early as possible.
    logging::init();

    match grab::run_from_args() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            let code = err
                .downcast_ref::<ExecError>()
                .map_or(1, ExecError::exit_code);
            std::process::exit(code);
        }
    }
}
