use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rainbow_core::categories::{self, CATEGORIES};
use rainbow_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "munch")]
#[command(about = "Eat the rainbow: a color-based daily food log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a day's meals and color mosaic (default)
    Day {
        /// Date to show (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log a food entry
    Add {
        /// Meal slot (breakfast, lunch, dinner, snack)
        #[arg(long)]
        meal: MealType,

        /// Color category; repeat for several
        #[arg(long = "category", short = 'c', required = true)]
        categories: Vec<MacroCategory>,

        /// Entry name; defaults to the category labels
        #[arg(long)]
        name: Option<String>,

        /// Gram estimate as CATEGORY=GRAMS; repeat for several
        #[arg(long, value_parser = parse_grams)]
        grams: Vec<(MacroCategory, f64)>,

        /// Date to log on (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a logged entry
    Remove {
        #[arg(long)]
        meal: MealType,

        /// Entry id as shown by `munch day`
        #[arg(long)]
        id: String,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the colors of the last seven days
    Week,

    /// Look up a barcode and optionally log the product
    Scan {
        barcode: String,

        /// Log the product into this meal slot
        #[arg(long)]
        meal: Option<MealType>,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show or change settings
    Settings {
        #[arg(long, value_name = "BOOL")]
        show_macro_details: Option<bool>,

        #[arg(long, value_name = "BOOL")]
        onboarded: Option<bool>,
    },

    /// List the color categories
    Categories,

    /// Delete all logged meals
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    rainbow_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let backend = FileStore::new(data_dir);

    match cli.command {
        Some(Commands::Day { date }) => cmd_day(backend, date),
        Some(Commands::Add {
            meal,
            categories,
            name,
            grams,
            date,
        }) => cmd_add(backend, meal, &categories, name, grams, date),
        Some(Commands::Remove { meal, id, date }) => cmd_remove(backend, meal, &id, date),
        Some(Commands::Week) => cmd_week(backend),
        Some(Commands::Scan {
            barcode,
            meal,
            date,
        }) => cmd_scan(backend, &config, &barcode, meal, date),
        Some(Commands::Settings {
            show_macro_details,
            onboarded,
        }) => cmd_settings(
            backend,
            SettingsPatch {
                show_macro_details,
                has_completed_onboarding: onboarded,
            },
        ),
        Some(Commands::Categories) => cmd_categories(),
        Some(Commands::Clear { yes }) => cmd_clear(backend, yes),
        None => cmd_day(backend, None),
    }
}

fn parse_grams(s: &str) -> std::result::Result<(MacroCategory, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=GRAMS, got {:?}", s))?;
    let category: MacroCategory = key.parse().map_err(|e: Error| e.to_string())?;
    let grams: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("grams must be a number, got {:?}", value))?;
    if !grams.is_finite() || grams < 0.0 {
        return Err(format!("grams must be zero or more, got {}", grams));
    }
    Ok((category, grams))
}

fn cmd_day(backend: FileStore, date: Option<NaiveDate>) -> Result<()> {
    let store = DayLogStore::open(backend.clone());
    let settings = SettingsStore::open(backend).get_settings();
    let log = store.get_day_log(date);

    display_day(&log, settings.show_macro_details);
    Ok(())
}

fn cmd_add(
    backend: FileStore,
    meal: MealType,
    colors: &[MacroCategory],
    name: Option<String>,
    grams: Vec<(MacroCategory, f64)>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut store = DayLogStore::open(backend.clone());
    let settings = SettingsStore::open(backend.clone()).get_settings();

    let mut entry = FoodEntry::new(name.as_deref().unwrap_or(""), colors)?;
    if !grams.is_empty() {
        if settings.show_macro_details {
            let details = grams
                .into_iter()
                .map(|(c, g)| (c, MacroDetail::grams(g)))
                .collect();
            entry = entry.with_details(details);
        } else {
            println!("(Macro details are off, grams not saved. Enable with `munch settings --show-macro-details true`.)");
        }
    }

    let name = entry.name.clone();
    let id = entry.id.clone();
    store.add_entry(meal, entry, date)?;

    println!("✓ Added {} to {}", name, categories::meal_info(meal).label);
    println!("  id: {}", id);
    println!();
    println!("  {}", encouragement(backend));
    Ok(())
}

fn cmd_remove(
    backend: FileStore,
    meal: MealType,
    id: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut store = DayLogStore::open(backend);
    if store.remove_entry(meal, id, date)? {
        println!("✓ Removed entry {}", id);
    } else {
        println!("No entry {} in {}, nothing to remove.", id, meal);
    }
    Ok(())
}

fn cmd_week(backend: FileStore) -> Result<()> {
    let store = DayLogStore::open(backend);
    let today = store.today();

    println!("This Week");
    for log in store.get_week_logs() {
        let dots: String = log
            .categories_present()
            .iter()
            .map(|c| categories::info(*c).emoji)
            .collect::<Vec<_>>()
            .join(" ");
        let marker = if log.date == today { "*" } else { " " };
        println!(
            "{} {} {}  {}",
            marker,
            log.date.format("%a"),
            date_key(log.date),
            if dots.is_empty() { "·".to_string() } else { dots }
        );
    }
    Ok(())
}

fn cmd_scan(
    backend: FileStore,
    config: &Config,
    barcode: &str,
    meal: Option<MealType>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let source = OpenFoodFacts::new(&config.lookup);

    let product = match lookup_barcode(&source, barcode) {
        Ok(Some(product)) => product,
        Ok(None) => {
            println!(
                "No product found for barcode {}. Try entering it manually.",
                barcode.trim()
            );
            return Ok(());
        }
        Err(e) if e.is_retryable() => {
            eprintln!("Network error. Please try again.");
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    display_product(&product);

    let Some(meal) = meal else {
        println!();
        println!("Add it with --meal <breakfast|lunch|dinner|snack>");
        return Ok(());
    };

    let settings = SettingsStore::open(backend.clone()).get_settings();
    let entry = FoodEntry::from_scanned(&product, settings.show_macro_details)?;
    let name = entry.name.clone();

    let mut store = DayLogStore::open(backend.clone());
    store.add_entry(meal, entry, date)?;

    println!();
    println!("✓ Added {} to {}", name, categories::meal_info(meal).label);
    println!("  {}", encouragement(backend));
    Ok(())
}

/// A quote that differs from the one shown after the previous entry
fn encouragement(mut backend: FileStore) -> String {
    let mut picker = QuotePicker::new();
    let picked = picker.next_quote_in(&mut backend).map(str::to_string);
    match picked {
        Ok(quote) => quote,
        Err(e) => {
            // The entry is already saved at this point
            tracing::warn!("Unable to record quote: {}", e);
            picker.next_quote().to_string()
        }
    }
}

fn cmd_settings(backend: FileStore, patch: SettingsPatch) -> Result<()> {
    let mut store = SettingsStore::open(backend);
    let settings = if patch.is_empty() {
        store.get_settings()
    } else {
        store.update_settings(patch)?
    };

    println!("show_macro_details = {}", settings.show_macro_details);
    println!("onboarded          = {}", settings.has_completed_onboarding);
    Ok(())
}

fn cmd_categories() -> Result<()> {
    for info in CATEGORIES.iter() {
        println!(
            "{} {:<10} {:<16} {}",
            info.emoji,
            info.key,
            info.label,
            info.description
        );
    }
    Ok(())
}

fn cmd_clear(backend: FileStore, yes: bool) -> Result<()> {
    if !yes {
        eprintln!("This deletes every logged meal. Re-run with --yes to confirm.");
        return Err(Error::Validation("Deletion not confirmed".into()));
    }

    let mut store = DayLogStore::open(backend);
    store.clear_all()?;
    println!("✓ All meal data deleted");
    Ok(())
}

fn display_day(log: &DayLog, show_details: bool) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", log.date.format("%A, %B %-d %Y"));
    println!("╰─────────────────────────────────────────╯");
    println!();

    if log.is_empty() {
        println!("  Your mosaic is empty. Log your first meal to start painting!");
    } else {
        println!(
            "  {}/{} colors",
            log.unique_colors(),
            MacroCategory::ALL.len()
        );
        let counts = log.category_counts();
        for info in CATEGORIES.iter() {
            let count = counts.get(&info.key).copied().unwrap_or(0);
            if count > 0 {
                println!("  {} {:<16} {}", info.emoji, info.label, count);
            }
        }
    }
    println!();

    for slot in &log.meals {
        let meal = categories::meal_info(slot.meal_type);
        println!("  {} {} ({})", meal.emoji, meal.label, meal.time_hint);
        if slot.entries.is_empty() {
            println!("     nothing yet");
        }
        for entry in &slot.entries {
            let colors: String = entry
                .categories
                .iter()
                .map(|c| categories::info(*c).emoji)
                .collect();
            println!("     {} {}  [{}]", colors, entry.name, entry.id);
            if show_details {
                if let Some(details) = &entry.macro_details {
                    for (category, detail) in details {
                        if let Some(grams) = detail.grams {
                            println!("        {}: {}g", categories::info(*category).label, grams);
                        }
                    }
                }
            }
        }
    }
    println!();
}

fn display_product(product: &ScannedProduct) {
    match &product.brand {
        Some(brand) => println!("  {} ({})", product.name, brand),
        None => println!("  {}", product.name),
    }
    println!("  Barcode: {}", product.barcode);
    for category in &product.categories {
        let info = categories::info(*category);
        match product.macro_details.get(category).and_then(|d| d.grams) {
            Some(grams) => println!("  → {} {} (~{}g per 100g)", info.emoji, info.label, grams),
            None => println!("  → {} {}", info.emoji, info.label),
        }
    }
    if let Some(url) = &product.image_url {
        println!("  ℹ Image: {}", url);
    }
}
