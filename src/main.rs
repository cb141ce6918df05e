fn main() -> std::process::ExitCode {
    json_prompt_lib::run()
}
