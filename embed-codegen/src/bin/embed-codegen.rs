/// CLI: embeds data files into a generated Go source file.
///
/// Usage:
///   embed-codegen -label //pkg:data -package data -var data \
///     -out data.go -workspace main file.txt
///   embed-codegen -label //pkg:data -package data -var files \
///     -out files.go -workspace main -multi -flatten a.txt b.bin
///   embed-codegen -manifest embed.json
use embed_codegen::args::Args;
use env_logger::Env;

fn main() {
    let args = Args::parse_go_style(std::env::args_os());
    env_logger::init_from_env(Env::default().default_filter_or(args.log_filter()));

    let result = args
        .into_configuration()
        .map_err(embed_codegen::Error::from)
        .and_then(|config| embed_codegen::run(&config));

    if let Err(e) = result {
        eprintln!("embed: {e}");
        std::process::exit(1);
    }
}
