use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;
use user_admin_cli::{App, UreqTransport};
use user_admin_core::{UserClient, UserListController};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let base_url =
        std::env::var("USER_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let controller =
        UserListController::new(UserClient::new(&base_url), UreqTransport::default());
    let mut app = App::new(controller);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    writeln!(out, "user-admin — backend {base_url}")?;
    app.start(&mut out)?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if !app.handle_command(line.trim(), &mut input, &mut out)? {
            break;
        }
    }
    Ok(())
}
