//! stock-report - Generate cost-control reports from a snapshot.

fn main() -> std::process::ExitCode {
    stockledger::cmd::report_cmd::main()
}
