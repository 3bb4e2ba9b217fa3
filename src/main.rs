use std::process::ExitCode;

fn main() -> ExitCode {
    dotnet_hwintrinsics::run_cli()
}
