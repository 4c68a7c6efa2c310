fn main() -> std::process::ExitCode {
    conecta_lib::run()
}
