// textnorm-export: Build grammars and write them as archives.
//
// Usage:
//   textnorm-export OUTPUT_DIR [OPTIONS]
//
// Options:
//   --lang LANG             Locale (default: en)
//   --non-deterministic     Keep alternative readings
//   --data-dir DIR          Directory overriding the embedded locale tables
//   -h, --help              Print help

use std::path::PathBuf;

use textnorm_grammars::{NormalizerOptions, engine, export_grammars};

fn main() {
    textnorm_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if textnorm_cli::wants_help(&args) {
        println!("textnorm-export: Build normalization grammars and export them.");
        println!();
        println!("Usage: textnorm-export OUTPUT_DIR [OPTIONS]");
        println!();
        println!("Writes OUTPUT_DIR/classify/tokenize_and_classify_tmp.far and");
        println!("OUTPUT_DIR/verbalize/verbalize_tmp.far, replacing earlier exports.");
        println!();
        println!("Options:");
        println!("  --lang LANG             Locale (default: en)");
        println!("  --non-deterministic     Keep alternative readings");
        println!("  --data-dir DIR          Directory overriding the embedded locale tables");
        println!("  -h, --help              Print this help");
        return;
    }

    let (lang, args) = textnorm_cli::take_value(&args, "--lang", None);
    let (data_dir, args) = textnorm_cli::take_value(&args, "--data-dir", None);
    let (non_deterministic, args) = textnorm_cli::take_flag(&args, "--non-deterministic");

    if let Some(unknown) = args.iter().find(|a| a.starts_with('-')) {
        textnorm_cli::fatal(&format!("unknown option {unknown}"));
    }
    let output_dir = match args.as_slice() {
        [dir] => PathBuf::from(dir),
        [] => textnorm_cli::fatal("missing OUTPUT_DIR (see --help)"),
        _ => textnorm_cli::fatal("expected exactly one OUTPUT_DIR"),
    };

    let options = NormalizerOptions {
        language: lang.unwrap_or_else(|| "en".to_string()),
        deterministic: !non_deterministic,
        data_dir: data_dir.map(PathBuf::from),
    };
    let engine = engine().unwrap_or_else(|e| textnorm_cli::fatal(&e.to_string()));
    let written = export_grammars(&engine, &output_dir, &options)
        .unwrap_or_else(|e| textnorm_cli::fatal(&e.to_string()));

    println!("{}", written.classify.display());
    println!("{}", written.verbalize.display());
}
