//! stock-check - Data-quality checks over a snapshot.

fn main() -> std::process::ExitCode {
    stockledger::cmd::check_cmd::main()
}
