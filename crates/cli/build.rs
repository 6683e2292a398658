use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("lustre")
        .version("1.0.0")
        .author("Lustre Contributors")
        .about("Enrich images in feed articles")
        .arg(clap::arg!(<INPUT> "Article JSON file (one article or an array), or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(--config <FILE> "Config file (default: ~/.config/lustre/config.json when present)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"no-inline" "Leave inline <img> tags untouched"))
        .arg(clap::arg!(--"no-fix-types" "Leave empty enclosure types untouched"))
        .arg(clap::arg!(--"extract-og" "Fetch the article page for Open Graph metadata when the article has no images"))
        .arg(clap::arg!(--"enhance-content" "Prepend og:description to thin content (with --extract-og)"))
        .arg(clap::arg!(--"upgrade-enclosures" "Replace image enclosures with larger versions found on the article page"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(--pretty "Pretty-print the output JSON"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "lustre", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "lustre", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "lustre", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "lustre", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
