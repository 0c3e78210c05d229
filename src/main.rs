//! Ghost Pixels - hide encrypted messages in image pixels.
//!
//! Loads images with the `image` crate, hands the RGBA buffer to the library
//! and writes the result back in a lossless format.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use ghost_pixels::advisor::{
    parse_recommendation, render_prompt, smallest_fitting, AdvisorRequest, HeuristicAdvisor,
    SettingsAdvisor,
};
use ghost_pixels::stego::{available_bits, max_message_len};
use ghost_pixels::{hide_message, reveal_message, BitDepth, ChannelSet, StegoSettings};
use image::{ImageFormat, RgbaImage};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ghost-pixels")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Hide encrypted messages in the least significant bits of image pixels",
    long_about = "Encrypts a message with a password (AES-256-GCM, PBKDF2-SHA256) and embeds it in the low-order bits of an image's color channels."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SettingsArgs {
    /// Low-order bits per channel byte (1-8)
    #[arg(long, default_value = "1")]
    bit_depth: u8,

    /// Channel(s) carrying the payload: R, G, B or RGB
    #[arg(long, default_value = "RGB")]
    channel: ChannelSet,

    /// JSON settings file; overrides --bit-depth and --channel
    #[arg(long)]
    settings: Option<PathBuf>,
}

impl SettingsArgs {
    fn resolve(&self) -> anyhow::Result<StegoSettings> {
        match &self.settings {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                Ok(StegoSettings::from_json(&json)?)
            }
            None => Ok(StegoSettings::new(self.bit_depth, self.channel)?),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message and hide it in an image
    Encode {
        /// Cover image
        input: PathBuf,

        /// Output image (PNG, BMP, TIFF; lossy formats are refused)
        output: PathBuf,

        /// Message text
        #[arg(long, conflicts_with = "message_file")]
        message: Option<String>,

        /// Read the message from a file
        #[arg(long, conflicts_with = "message")]
        message_file: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Extract and decrypt a hidden message
    Decode {
        /// Image containing a hidden message
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Show how much an image can carry
    Capacity {
        /// Cover image
        input: PathBuf,

        /// Also suggest the least intrusive settings for a message of this many bytes
        #[arg(long)]
        message_len: Option<usize>,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Suggest settings for a job
    Recommend {
        /// Description of the message
        #[arg(long, default_value = "")]
        text: String,

        /// Description of the cover image
        #[arg(long, default_value = "")]
        image: String,

        /// Intended use, e.g. "covert communication" or "archiving"
        #[arg(long, default_value = "")]
        use_case: String,

        /// Print the prompt for an external text-generation service and exit
        #[arg(long, conflicts_with = "response")]
        prompt: bool,

        /// Read the service's JSON reply instead of using the built-in rules
        #[arg(long)]
        response: Option<PathBuf>,

        /// Save the recommended settings as JSON for --settings
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Encode {
            input,
            output,
            message,
            message_file,
            settings,
        } => cmd_encode(&input, &output, message, message_file, &settings.resolve()?),

        Commands::Decode {
            input,
            output,
            settings,
        } => cmd_decode(&input, output, &settings.resolve()?),

        Commands::Capacity {
            input,
            message_len,
            settings,
        } => cmd_capacity(&input, message_len, &settings.resolve()?),

        Commands::Recommend {
            text,
            image,
            use_case,
            prompt,
            response,
            save,
        } => {
            let request = AdvisorRequest {
                text_description: text,
                image_description: image,
                use_case,
            };
            cmd_recommend(&request, prompt, response, save)
        }
    }
}

fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    match rpassword::prompt_password(prompt) {
        Ok(password) => Ok(password),
        Err(_) => {
            eprint!("{}", prompt);
            io::stderr().flush()?;
            let mut password = String::new();
            io::stdin().read_line(&mut password)?;
            Ok(password.trim().to_string())
        }
    }
}

fn load_rgba(path: &Path) -> anyhow::Result<RgbaImage> {
    let image = image::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Output format from the file extension; lossy formats would destroy the payload.
fn lossless_format(path: &Path) -> anyhow::Result<ImageFormat> {
    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Jpeg) | Ok(ImageFormat::WebP) | Ok(ImageFormat::Avif) => bail!(
            "{} is a lossy format; hidden data only survives lossless formats such as PNG",
            path.display()
        ),
        Ok(format) => Ok(format),
        Err(_) => {
            log::warn!("unknown extension on {}, writing PNG", path.display());
            Ok(ImageFormat::Png)
        }
    }
}

fn cmd_encode(
    input: &Path,
    output: &Path,
    message: Option<String>,
    message_file: Option<PathBuf>,
    settings: &StegoSettings,
) -> anyhow::Result<()> {
    let format = lossless_format(output)?;

    let message = match (message, message_file) {
        (Some(text), None) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading message from {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        (Some(_), Some(_)) => unreachable!(),
    };

    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if password != confirm {
        bail!("passwords do not match");
    }

    let mut image = load_rgba(input)?;
    let (width, height) = image.dimensions();
    let plan = hide_message(&mut image, width, height, &message, &password, settings)?;

    image
        .save_with_format(output, format)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Message hidden in {}", output.display());
    println!(
        "  Settings: {} bit(s) in {}",
        settings.bit_depth, settings.channel
    );
    println!(
        "  Used:     {} of {} bits ({:.2}%)",
        plan.required_bits,
        plan.available_bits,
        plan.usage_percent()
    );

    Ok(())
}

fn cmd_decode(input: &Path, output: Option<PathBuf>, settings: &StegoSettings) -> anyhow::Result<()> {
    let image = load_rgba(input)?;
    let (width, height) = image.dimensions();
    let password = prompt_password("Password: ")?;

    let message = reveal_message(&image, width, height, &password, settings)?;

    match output {
        Some(path) => {
            std::fs::write(&path, &message)?;
            println!("Wrote {} bytes to {}", message.len(), path.display());
        }
        None => {
            io::stdout().write_all(message.as_bytes())?;
            println!();
        }
    }

    Ok(())
}

fn cmd_capacity(
    input: &Path,
    message_len: Option<usize>,
    settings: &StegoSettings,
) -> anyhow::Result<()> {
    let image = load_rgba(input)?;
    let (width, height) = image.dimensions();

    println!("Image:            {} x {} pixels", width, height);
    println!(
        "Settings:         {} bit(s) in {}",
        settings.bit_depth, settings.channel
    );
    println!(
        "Available:        {} bits",
        available_bits(width, height, settings.bit_depth, settings.channel)
    );
    println!(
        "Max message:      {} bytes",
        max_message_len(width, height, settings)
    );

    if let Some(len) = message_len {
        println!();
        match smallest_fitting(width, height, len) {
            Some(fit) => println!(
                "Least intrusive settings for {} bytes: --bit-depth {} --channel {}",
                len, fit.bit_depth, fit.channel
            ),
            None => println!(
                "No settings fit {} bytes; even {} bits in RGB is too small",
                len,
                BitDepth::MAX
            ),
        }
    }

    Ok(())
}

fn cmd_recommend(
    request: &AdvisorRequest,
    prompt: bool,
    response: Option<PathBuf>,
    save: Option<PathBuf>,
) -> anyhow::Result<()> {
    if prompt {
        print!("{}", render_prompt(request));
        return Ok(());
    }

    let recommendation = match response {
        Some(path) => {
            let reply = std::fs::read_to_string(&path)
                .with_context(|| format!("reading advisor reply from {}", path.display()))?;
            parse_recommendation(&reply)?
        }
        None => HeuristicAdvisor.recommend(request)?,
    };
    let settings = recommendation.to_settings()?;

    println!(
        "Recommended: --bit-depth {} --channel {}",
        settings.bit_depth, settings.channel
    );
    println!("Rationale:   {}", recommendation.rationale);

    if let Some(path) = save {
        std::fs::write(&path, settings.to_json()?)?;
        println!("Settings saved to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_outputs_refused() {
        for name in ["out.jpg", "out.jpeg", "out.webp"] {
            assert!(lossless_format(Path::new(name)).is_err(), "{}", name);
        }
    }

    #[test]
    fn test_lossless_outputs_accepted() {
        assert_eq!(
            lossless_format(Path::new("out.png")).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            lossless_format(Path::new("out.bmp")).unwrap(),
            ImageFormat::Bmp
        );
    }

    #[test]
    fn test_unknown_extension_writes_png() {
        assert_eq!(
            lossless_format(Path::new("out.xyz")).unwrap(),
            ImageFormat::Png
        );
    }
}
