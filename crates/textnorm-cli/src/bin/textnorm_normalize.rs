// textnorm-normalize: Convert written text to its spoken form.
//
// Normalizes each TEXT argument, or each stdin line when none is given.
//
// Usage:
//   textnorm-normalize [OPTIONS] [TEXT...]
//
// Options:
//   --lang LANG             Locale to build grammars for (default: en)
//   -f, --far-dir DIR       Load exported archives instead of building
//   --alternatives N        Print up to N readings per input, tab-separated
//   --data-dir DIR          Directory overriding the embedded locale tables
//   -h, --help              Print help

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use textnorm_grammars::{Normalizer, NormalizerOptions};

fn main() {
    textnorm_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if textnorm_cli::wants_help(&args) {
        println!("textnorm-normalize: Convert written text to its spoken form.");
        println!();
        println!("Usage: textnorm-normalize [OPTIONS] [TEXT...]");
        println!();
        println!("If TEXT arguments are given, normalizes each one.");
        println!("Otherwise reads lines from stdin.");
        println!();
        println!("Options:");
        println!("  --lang LANG             Locale to build grammars for (default: en)");
        println!("  -f, --far-dir DIR       Load exported archives instead of building");
        println!("  --alternatives N        Print up to N readings per input, tab-separated");
        println!("  --data-dir DIR          Directory overriding the embedded locale tables");
        println!("  -h, --help              Print this help");
        return;
    }

    let (lang, args) = textnorm_cli::take_value(&args, "--lang", None);
    let (far_dir, args) = textnorm_cli::take_value(&args, "--far-dir", Some("-f"));
    let (data_dir, args) = textnorm_cli::take_value(&args, "--data-dir", None);
    let (alternatives, texts) = textnorm_cli::take_value(&args, "--alternatives", None);

    let alternatives: Option<usize> = alternatives.map(|n| {
        n.parse()
            .unwrap_or_else(|_| textnorm_cli::fatal("invalid number for --alternatives"))
    });
    if let Some(unknown) = texts.iter().find(|a| a.starts_with("--")) {
        textnorm_cli::fatal(&format!("unknown option {unknown}"));
    }

    let options = NormalizerOptions {
        language: lang.unwrap_or_else(|| "en".to_string()),
        deterministic: alternatives.is_none(),
        data_dir: data_dir.map(PathBuf::from),
    };
    let normalizer = textnorm_cli::load_normalizer(far_dir.as_deref(), &options)
        .unwrap_or_else(|e| textnorm_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let emit = |text: &str, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        let line = render(&normalizer, text, alternatives);
        let _ = writeln!(out, "{line}");
    };

    if texts.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            emit(&line, &mut out);
        }
    } else {
        for text in &texts {
            emit(text, &mut out);
        }
    }
}

fn render(normalizer: &Normalizer, text: &str, alternatives: Option<usize>) -> String {
    match alternatives {
        Some(n) => normalizer.normalize_alternatives(text, n).join("\t"),
        None => normalizer.normalize(text),
    }
}
