// SPDX-License-Identifier: MPL-2.0
use search_lens::app::{self, paths, Flags};

const USAGE: &str = "\
Usage: search_lens [OPTIONS] [QUERY_IMAGE]

Options:
  --lang <ID>          Interface language (e.g. en-US, fr)
  --server <URL>       Search backend URL
  --config-dir <DIR>   Directory holding settings.toml
  -h, --help           Print this help";

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::init();
        return;
    }

    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Warn)
        .filter_module("search_lens", log::LevelFilter::Debug)
        .init();
}

fn optional_arg(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    args.opt_value_from_str(key).unwrap_or_else(|err| {
        log::warn!("ignoring {key}: {err}");
        None
    })
}

fn main() -> iced::Result {
    init_logging();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return Ok(());
    }

    let lang = optional_arg(&mut args, "--lang");
    let server = optional_arg(&mut args, "--server");
    let config_dir = optional_arg(&mut args, "--config-dir");
    let query_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|arg| arg.into_string().ok());

    paths::init_cli_override(config_dir.clone());

    app::run(Flags {
        lang,
        server,
        config_dir,
        query_path,
    })
}
