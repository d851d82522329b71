use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stockdbf::cli as prog_cli;
use stockdbf::config::{AppConfig, load_config};
use stockdbf::logger::configure_logging;

#[derive(Parser, Debug)]
#[command(name = "stockdbf", version, about = "Export xBase/DBF stock tables to CSV", long_about = None)]
struct Cli {
    #[arg(long, global = true, help = "Path to a config file (TOML). Overrides STOCKDBF_CONFIG and discovered files.")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Log level: error|warn|info|debug|trace|off")]
    log_level: Option<String>,
    #[arg(long, global = true, help = "Also write rolling log files to this directory")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Export a DBF table to a delimited text file")]
    Export {
        #[arg(long, help = "Source .dbf path (default: STOCK_DBF_PATH, config, or stock.DBF)")]
        dbf: Option<PathBuf>,
        #[arg(long, help = "Destination path (default: STOCK_CSV_PATH, config, or stock_export.csv)")]
        out: Option<PathBuf>,
        #[arg(long, help = "Field delimiter, one byte; \\t or tab for a tab")]
        delim: Option<String>,
        #[arg(long, allow_negative_numbers = true, help = "Maximum rows to write; 0 means all")]
        limit: Option<i64>,
        #[arg(long, allow_negative_numbers = true, help = "Source records to skip first")]
        offset: Option<i64>,
        #[arg(long, help = "Column layout: api (product import) or dbf (all source fields)")]
        format: Option<String>,
        #[arg(long, help = "Text encoding of the source, e.g. windows-1252, cp850, utf-8")]
        encoding: Option<String>,
        #[arg(long, help = "Do not write a UTF-8 byte order mark")]
        no_bom: bool,
        #[arg(long, help = "Report format: human|plain|json")]
        output: Option<String>,
    },
    #[command(about = "Show the fields and record count of a DBF table")]
    Inspect {
        #[arg(long, help = "Source .dbf path")]
        dbf: Option<PathBuf>,
        #[arg(long, help = "Text encoding of the source")]
        encoding: Option<String>,
        #[arg(long, default_value_t = 0, help = "Also show the first N records")]
        preview: usize,
        #[arg(long, help = "Report format: human|plain|json")]
        output: Option<String>,
    },
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("error: {e}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    // Precedence: CLI > env > config files > defaults
    let mut cfg: AppConfig = load_config(cli.config.as_deref()).unwrap_or_else(|e| fail(e));
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level;
    }
    if cli.log_dir.is_some() {
        cfg.log_dir = cli.log_dir;
    }
    if let Err(e) = configure_logging(&cfg.log_settings()) {
        fail(e);
    }

    let (cmd, output) = match cli.command {
        Commands::Export { dbf, out, delim, limit, offset, format, encoding, no_bom, output } => {
            cfg.dbf_path = dbf.or(cfg.dbf_path);
            cfg.csv_path = out.or(cfg.csv_path);
            cfg.delimiter = delim.or(cfg.delimiter);
            cfg.format = format.or(cfg.format);
            cfg.encoding = encoding.or(cfg.encoding);
            if no_bom {
                cfg.bom = Some(false);
            }
            let mut opts = cfg.export_options().unwrap_or_else(|e| fail(e));
            opts.window = prog_cli::parse_window(offset, limit);
            (prog_cli::Command::Export { dbf: cfg.dbf_path(), out: cfg.csv_path(), opts }, output)
        }
        Commands::Inspect { dbf, encoding, preview, output } => {
            cfg.dbf_path = dbf.or(cfg.dbf_path);
            cfg.encoding = encoding.or(cfg.encoding);
            let cmd = prog_cli::Command::Inspect { dbf: cfg.dbf_path(), encoding: cfg.encoding().to_string(), preview };
            (cmd, output)
        }
    };

    if let Err(e) = prog_cli::run_with_format(cmd, prog_cli::parse_output_mode(&output)) {
        fail(e);
    }
}
