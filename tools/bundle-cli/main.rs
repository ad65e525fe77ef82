use bundle_builder::prelude::*;
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// CLI-side mirror of `InputKind` for clap.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindCli {
    Radio,
    MultiSelect,
    Text,
    File,
}

impl From<KindCli> for InputKind {
    fn from(kind: KindCli) -> Self {
        match kind {
            KindCli::Radio => InputKind::Radio,
            KindCli::MultiSelect => InputKind::MultiSelect,
            KindCli::Text => InputKind::Text,
            KindCli::File => InputKind::File,
        }
    }
}

/// Inspect and edit product bundle configurations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the bundle payload JSON file
    payload_path: Option<String>,

    /// Optional path to a store config JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Input type shown in the paged view
    #[arg(short = 't', long = "type", value_enum, default_value = "radio")]
    kind: KindCli,

    /// Page of the paged view (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Run in interactive mode to edit the bundle
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,

    /// Log store edits (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => StoreConfig::default(),
    };
    let store = load_store(cli.payload_path.as_deref(), config);

    if cli.human {
        run_interactive(store, cli.payload_path);
    } else {
        print_overview(&store, cli.kind.into(), cli.page);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_store(path: Option<&str>, config: StoreConfig) -> BundleStore {
    match path {
        Some(path) if fs::metadata(path).is_ok() => {
            let payload = BundlePayload::from_file(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to load payload from '{}': {}", path, e))
            });
            BundleStore::from_payload(payload, config)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid payload: {}", e)))
        }
        Some(path) => {
            println!("'{}' does not exist yet; starting an empty bundle.", path);
            BundleStore::builder().with_config(config).build()
        }
        None => BundleStore::builder().with_config(config).build(),
    }
}

/// Prints the outline plus one page of inputs of `kind` for every block.
fn print_overview(store: &BundleStore, kind: InputKind, page: usize) {
    let settings = store.settings();
    println!("--- Bundle Settings ---");
    println!("Key Type:        {}", settings.key_type);
    println!("Fabrication:     {}", settings.fabrication);
    println!("Additional Keys: {}", settings.additional_keys);
    println!(
        "Custom Option:   {} ({})",
        settings.custom_options.name,
        settings.custom_options.kind.as_str()
    );

    println!("\n--- Blocks ---");
    println!("{}", store.summary());

    for block in store.blocks() {
        print_page(store, block.id(), kind, page);
    }
}

fn print_page(store: &BundleStore, block_id: BlockId, kind: InputKind, page: usize) {
    let Ok(view) = store.project_block(block_id, kind, page) else {
        return;
    };
    println!(
        "\nBlock #{} - {} inputs, page {} of {}",
        block_id,
        kind.label(),
        view.page_number,
        view.total_pages
    );
    if view.is_empty() {
        println!("  (nothing on this page)");
    }
    for input in &view.visible {
        let options = input
            .options()
            .map_or("-".to_string(), |o| format!("{} options", o.len()));
        println!("  #{:<6} {:<24} {:<30} {}", input.id(), input.title(), input.explanation(), options);
    }
}

/// Runs the CLI as a small menu-driven editor.
fn run_interactive(mut store: BundleStore, payload_path: Option<String>) {
    println!("--- Bundle Builder Interactive Mode ---");

    loop {
        println!("\nActions:");
        println!("  1: Create block        2: Edit block");
        println!("  3: Add input           4: Add option");
        println!("  5: Edit option         6: Show page");
        println!("  7: Edit settings       8: Save");
        println!("  q: Quit");
        let choice = prompt_for_input("Enter choice", None);

        let outcome = match choice.trim() {
            "1" => store.create_block().map(|block| {
                println!("Created block #{}", block.id());
            }),
            "2" => edit_block(&mut store),
            "3" => add_input(&mut store),
            "4" => add_option(&mut store),
            "5" => edit_option(&mut store),
            "6" => {
                show_page(&store);
                Ok(())
            }
            "7" => {
                edit_settings(&mut store);
                Ok(())
            }
            "8" => {
                save(&store, payload_path.as_deref());
                Ok(())
            }
            "q" | "Q" => break,
            _ => {
                println!("Invalid choice.");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("Error: {}", e);
        }
    }
}

fn edit_block(store: &mut BundleStore) -> std::result::Result<(), BundleError> {
    let block_id = BlockId::from_raw(prompt_for_id("Block id"));
    let title = prompt_for_input("New title (empty keeps current)", None);
    let description = prompt_for_input("New description (empty keeps current)", None);

    let mut patch = BlockPatch::new();
    if !title.is_empty() {
        patch = patch.title(title);
    }
    if !description.is_empty() {
        patch = patch.description(description);
    }
    store.update_block(block_id, patch)?;
    Ok(())
}

fn add_input(store: &mut BundleStore) -> std::result::Result<(), BundleError> {
    let block_id = BlockId::from_raw(prompt_for_id("Block id"));
    let type_name = prompt_for_input("Input type (radio, multiSelect, text, file)", Some("radio"));
    let kind = type_name.parse::<InputKind>()?;

    store.begin_input_draft(block_id, kind)?;
    store.set_draft_title(prompt_for_input("Input title", None))?;
    store.set_draft_explanation(prompt_for_input("Explanation", None))?;
    let input = store.commit_draft()?;
    println!("Added {} input #{}", input.kind(), input.id());
    Ok(())
}

fn add_option(store: &mut BundleStore) -> std::result::Result<(), BundleError> {
    let block_id = BlockId::from_raw(prompt_for_id("Block id"));
    let input_id = InputId::from_raw(prompt_for_id("Input id"));
    let option = store.add_option(block_id, input_id)?;
    println!("Added option #{}", option.id());
    Ok(())
}

fn edit_option(store: &mut BundleStore) -> std::result::Result<(), BundleError> {
    let block_id = BlockId::from_raw(prompt_for_id("Block id"));
    let input_id = InputId::from_raw(prompt_for_id("Input id"));
    let option_id = OptionId::from_raw(prompt_for_id("Option id"));
    let is_multi_select = store
        .input(block_id, input_id)
        .is_some_and(|input| input.kind().has_quantity());

    let title = prompt_for_input("New title (empty keeps current)", None);
    let description = prompt_for_input("New description (empty keeps current)", None);
    let price = prompt_for_input("New price adjustment (empty keeps current)", None);

    let mut patch = OptionPatch::new();
    if !title.is_empty() {
        patch = patch.title(title);
    }
    if !description.is_empty() {
        patch = patch.description(description);
    }
    if !price.is_empty() {
        patch = patch.price_adjustment_text(&price);
    }
    if is_multi_select {
        let quantity = prompt_for_input("New default quantity (empty keeps current)", None);
        if !quantity.is_empty() {
            patch = patch.quantity_text(&quantity);
        }
    }

    let option = store.update_option(block_id, input_id, option_id, patch)?;
    println!(
        "Option #{} now '{}' at {}",
        option.id(),
        option.title(),
        option.price_adjustment()
    );
    Ok(())
}

fn show_page(store: &BundleStore) {
    let block_id = BlockId::from_raw(prompt_for_id("Block id"));
    let kind = prompt_for_input("Input type", Some("radio"))
        .parse::<InputKind>()
        .unwrap_or(InputKind::Radio);
    let page = prompt_for_id("Page");
    if store.block(block_id).is_none() {
        println!("No block #{}", block_id);
        return;
    }
    print_page(store, block_id, kind, page as usize);
}

fn edit_settings(store: &mut BundleStore) {
    let key_type = loop {
        let raw = prompt_for_input("Key type (same/custom)", Some("same"));
        match raw.parse::<KeyType>() {
            Ok(key_type) => break key_type,
            Err(_) => println!("Please enter 'same' or 'custom'."),
        }
    };
    let fabrication = prompt_for_input("Fabrication required? (y/n)", Some("n"))
        .eq_ignore_ascii_case("y");
    let additional_keys = prompt_for_input("Additional keys", Some("0"));

    let patch = SettingsPatch::new()
        .key_type(key_type)
        .fabrication(fabrication)
        .additional_keys_text(&additional_keys);
    store.update_settings(&patch);
}

fn save(store: &BundleStore, payload_path: Option<&str>) {
    let path = payload_path.map_or_else(
        || prompt_for_input("Save payload to", Some("bundle.json")),
        str::to_string,
    );
    let mut sink = |payload: &BundlePayload| -> std::result::Result<(), PayloadError> {
        let json = payload.to_json_pretty()?;
        fs::write(&path, json)
            .map_err(|e| PayloadError::Io(format!("Could not write '{}': {}", path, e)))
    };
    match store.save_with(&mut sink) {
        Ok(()) => println!("Saved bundle to '{}'", path),
        Err(e) => println!("Error: {}", e),
    }
}

/// Prompts until the user enters a non-negative integer.
fn prompt_for_id(prompt_text: &str) -> u64 {
    loop {
        match prompt_for_input(prompt_text, None).parse() {
            Ok(id) => return id,
            Err(_) => println!("Please enter a number."),
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    let read = io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    if read == 0 {
        // stdin closed
        println!();
        std::process::exit(0);
    }
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
