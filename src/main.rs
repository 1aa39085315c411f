//! request-intl
//!
//! Command-line front end for checking locale resolution and translations
//! against a configuration file.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    match request_intl::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // clap has already printed usage errors
            let already_reported =
                matches!(&e, request_intl::Error::InvalidArgument(msg) if msg.is_empty());
            if !already_reported {
                eprintln!("Error: {e}");
            }

            let code = e.exit_code();
            ExitCode::from(code as u8)
        },
    }
}
