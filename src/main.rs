use clap::{Parser, Subcommand};
use iconkit::config::{self, IconConfig};
use iconkit::icons::{self, IconEvent, Job};
use iconkit::output;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, Sender};

#[derive(Parser)]
#[command(name = "iconkit")]
#[command(about = "Prepare app launcher icons from a single source image")]
#[command(long_about = "\
Prepare app launcher icons from a single source image

Three jobs, chained by file naming:

  assets/images/icon.png
    └─ remove-bg → assets/images/icon_transparent.png
         ├─ android → android/app/src/main/res/mipmap-<qualifier>/
         │              ic_launcher.png, ic_launcher_round.png
         └─ ios     → ios/StriverApp/Images.xcassets/AppIcon.appiconset/
                        AppIcon-*.png

Paths and size tables come from iconkit.toml in the project directory when
present, otherwise from the stock defaults above.

Run 'iconkit gen-config' to generate a documented iconkit.toml.")]
#[command(version)]
struct Cli {
    /// Project directory; config and relative paths are resolved against it
    #[arg(long, default_value = ".", global = true)]
    project: PathBuf,

    /// Config file to load instead of <project>/iconkit.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Make the light background of the source icon transparent
    RemoveBg {
        /// Source image
        #[arg(long)]
        input: Option<PathBuf>,
        /// Where to write the RGBA PNG
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render Android launcher icons into mipmap directories
    Android {
        /// Source image
        #[arg(long)]
        source: Option<PathBuf>,
        /// Android resource directory
        #[arg(long)]
        res_dir: Option<PathBuf>,
    },
    /// Render the iOS App Icon set
    Ios {
        /// Source image
        #[arg(long)]
        source: Option<PathBuf>,
        /// AppIcon.appiconset directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Run the full pipeline: remove-bg → android → ios
    Build,
    /// Validate config and inspect source images without writing anything
    Check,
    /// Print a stock iconkit.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let load_config = || load(&cli.project, cli.config.as_deref());

    match cli.command {
        Command::RemoveBg { input, output } => {
            let mut config = load_config()?;
            override_path(&mut config.background.input, input);
            override_path(&mut config.background.output, output);
            with_printer(|tx| icons::remove_background(&config.background, Some(tx)))??;
        }
        Command::Android { source, res_dir } => {
            let mut config = load_config()?;
            override_path(&mut config.android.source, source);
            override_path(&mut config.android.res_dir, res_dir);
            let summary =
                with_printer(|tx| icons::resize_android(&config.android, Some(tx)))??;
            output::print_resize_summary(Job::Android, &summary);
        }
        Command::Ios { source, output_dir } => {
            let mut config = load_config()?;
            override_path(&mut config.ios.source, source);
            override_path(&mut config.ios.output_dir, output_dir);
            let summary = with_printer(|tx| icons::resize_ios(&config.ios, Some(tx)))??;
            output::print_resize_summary(Job::Ios, &summary);
        }
        Command::Build => {
            let config = load_config()?;
            let report = with_printer(|tx| icons::build(&config, Some(tx)))??;
            output::print_resize_summary(Job::Android, &report.android);
            output::print_resize_summary(Job::Ios, &report.ios);
            println!("==> Build complete");
        }
        Command::Check => {
            let config = load_config()?;
            println!("==> Checking {}", cli.project.display());
            output::print_check_output(&icons::check(&config));
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the explicit config file if one was given, else the project's own.
fn load(project: &Path, config_path: Option<&Path>) -> Result<IconConfig, config::ConfigError> {
    match config_path {
        Some(path) => config::load_config_file(path, project),
        None => config::load_config(project),
    }
}

/// CLI path flags are taken as given, relative to the working directory.
fn override_path(slot: &mut PathBuf, flag: Option<PathBuf>) {
    if let Some(path) = flag {
        *slot = path;
    }
}

/// Run a job while a printer thread streams its events to stdout.
fn with_printer<T>(job: impl FnOnce(&Sender<IconEvent>) -> T) -> Result<T, Box<dyn Error>> {
    let (tx, rx) = mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_icon_event(&event);
        }
    });
    let result = job(&tx);
    drop(tx);
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    Ok(result)
}
