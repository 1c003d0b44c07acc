//! Card Stack Demo
//!
//! Drives the sample adapter through a scripted session and prints where the
//! cards end up, and manages the demo preferences file.

use anyhow::{Context, Result};
use cardstack::prelude::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod prefs;
mod sample;

use prefs::{DemoPrefs, PREFS_FILE};
use sample::{SampleAdapter, SampleCard};

/// Frame length used to play transitions
const FRAME_MS: f32 = 16.0;

#[derive(Parser)]
#[command(name = "cardstack-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Card stack sample host", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Preferences file
    #[arg(long, global = true, default_value = PREFS_FILE)]
    prefs: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind the sample cards, tap one open, then tap it closed
    Run {
        /// Card to tap
        #[arg(short, long, default_value = "3")]
        select: usize,

        /// Screen height in pixels
        #[arg(long, default_value = "1920")]
        screen_height: f32,

        /// Pixels per dp
        #[arg(long, default_value = "2.625")]
        density: f32,

        /// Scroll the stack before tapping
        #[arg(long, default_value = "0")]
        scroll: f32,
    },

    /// Print the current preferences
    Prefs,

    /// Change preferences
    Set {
        #[arg(long)]
        show_init_animation: Option<bool>,

        #[arg(long)]
        parallax_enabled: Option<bool>,

        #[arg(long, allow_hyphen_values = true)]
        parallax_scale: Option<i32>,

        /// Resting gap in dp
        #[arg(long)]
        card_gap: Option<i32>,

        /// Collapsed gap in dp
        #[arg(long)]
        card_gap_bottom: Option<i32>,

        #[arg(long)]
        reverse_click_animation: Option<bool>,
    },

    /// Restore every preference to its default
    ResetDefaults,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            select,
            screen_height,
            density,
            scroll,
        } => cmd_run(&cli.prefs, select, screen_height, density, scroll),

        Commands::Prefs => cmd_prefs(&cli.prefs),

        Commands::Set {
            show_init_animation,
            parallax_enabled,
            parallax_scale,
            card_gap,
            card_gap_bottom,
            reverse_click_animation,
        } => {
            let mut prefs = DemoPrefs::load(&cli.prefs)?;
            if let Some(v) = show_init_animation {
                prefs.show_init_animation = v;
            }
            if let Some(v) = parallax_enabled {
                prefs.parallax_enabled = v;
            }
            if let Some(v) = parallax_scale {
                prefs.parallax_scale = v;
            }
            if let Some(v) = card_gap {
                prefs.card_gap = v;
            }
            if let Some(v) = card_gap_bottom {
                prefs.card_gap_bottom = v;
            }
            if let Some(v) = reverse_click_animation {
                prefs.reverse_click_animation = v;
            }
            prefs.save(&cli.prefs)?;
            info!("Saved {}", cli.prefs.display());
            cmd_prefs(&cli.prefs)
        }

        Commands::ResetDefaults => {
            DemoPrefs::reset_defaults(&cli.prefs)?;
            cmd_prefs(&cli.prefs)
        }
    }
}

fn cmd_prefs(path: &Path) -> Result<()> {
    let prefs = DemoPrefs::load(path)?;
    let content = toml::to_string_pretty(&prefs).context("Failed to serialize preferences")?;
    println!("# {}", path.display());
    print!("{content}");
    Ok(())
}

fn cmd_run(
    path: &Path,
    select: usize,
    screen_height: f32,
    density: f32,
    scroll: f32,
) -> Result<()> {
    let prefs = DemoPrefs::load(path)?;
    let metrics = DisplayMetrics::new(screen_height, density);
    let config = prefs.to_config(&metrics);

    let mut stack = CardStackLayout::new(config, metrics);
    stack.set_on_card_selected(|card: &SampleCard, index| {
        info!("Opened card {} ({})", index, card.label());
    });
    stack.bind(SampleAdapter::new(prefs))?;
    info!(
        "Bound {} cards, {:.0}px tall",
        stack.card_count(),
        stack.frame().card_height()
    );

    play(&mut stack);
    print_positions("resting", &stack);

    if select >= stack.card_count() {
        anyhow::bail!(
            "No card {} to select ({} cards bound)",
            select,
            stack.card_count()
        );
    }

    stack.scroll_to(scroll);
    tap(&mut stack, select)?;
    play(&mut stack);
    print_positions("selected", &stack);

    tap(&mut stack, select)?;
    play(&mut stack);
    print_positions("restored", &stack);

    stack.unbind();
    Ok(())
}

/// Tap just below the top edge of card `position`
fn tap(stack: &mut CardStackLayout<SampleCard>, position: usize) -> Result<()> {
    let y = stack
        .card_y(position)
        .context("Card disappeared from the stack")?
        - stack.scroll_y()
        + 1.0;
    stack.dispatch_touch(&TouchEvent::down(y));
    stack.dispatch_touch(&TouchEvent::up(y));
    Ok(())
}

fn play(stack: &mut CardStackLayout<SampleCard>) {
    while stack.tick(FRAME_MS) {}
}

fn print_positions(label: &str, stack: &CardStackLayout<SampleCard>) {
    println!("{label}:");
    for slot in stack.frame().iter() {
        let marker = if stack.selected_card_position() == Some(slot.position()) {
            "*"
        } else {
            " "
        };
        println!(
            "  {marker} {:>2} {:<10} y = {:>7.1}",
            slot.position(),
            slot.view().label(),
            slot.y()
        );
    }
}
