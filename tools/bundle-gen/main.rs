use bundle_builder::prelude::*;
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

const BLOCK_TITLES: &[&str] = &["Size", "Finish", "Hardware", "Engraving", "Extras", "Packaging"];
const OPTION_TITLES: &[&str] = &[
    "Small", "Medium", "Large", "Brass", "Nickel", "Matte", "Gloss", "Gift box", "Spare key",
];

/// A CLI tool to generate sample bundle payloads
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_bundle.json")]
    output: String,

    /// Number of blocks to generate
    #[arg(long, default_value_t = 3)]
    blocks: usize,

    /// The maximum number of inputs per block
    #[arg(long, default_value_t = 12)]
    max_inputs: usize,

    /// The maximum number of options per radio/multi-select input
    #[arg(long, default_value_t = 5)]
    max_options: usize,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.max_options == 0 {
        eprintln!("Error: --max-options must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating {} blocks (up to {} inputs, {} options each)...",
        cli.blocks, cli.max_inputs, cli.max_options
    );

    let mut store = BundleStore::new();
    for _ in 0..cli.blocks {
        generate_block(&mut store, &mut rng, &cli)?;
    }
    store.update_settings(&random_settings(&mut rng));

    let json_output = store.to_payload().to_json_pretty()?;
    fs::write(&cli.output, json_output)?;

    println!("{}", store.summary());
    println!(
        "Successfully generated and saved bundle payload to '{}'",
        cli.output
    );
    Ok(())
}

/// Fills one block with random inputs through the store's own mutators.
fn generate_block(
    store: &mut BundleStore,
    rng: &mut ThreadRng,
    cli: &Cli,
) -> std::result::Result<(), BundleError> {
    let block = store.create_block()?;
    let title = BLOCK_TITLES.choose(rng).copied().unwrap_or("Block");
    store.update_block(
        block.id(),
        BlockPatch::new()
            .title(title)
            .description(format!("Choose your {}", title.to_lowercase())),
    )?;

    let input_count = rng.random_range(0..=cli.max_inputs);
    for n in 0..input_count {
        let kind = *InputKind::ALL.choose(rng).unwrap_or(&InputKind::Text);
        let input = store.add_input(block.id(), kind)?;
        store.update_input(
            block.id(),
            input.id(),
            InputPatch::new().title(format!("{} {}", kind.label(), n + 1)),
        )?;

        let Some(seeded) = input.options().and_then(|o| o.first()) else {
            continue;
        };
        let mut option_ids = vec![seeded.id()];
        for _ in 1..rng.random_range(1..=cli.max_options) {
            option_ids.push(store.add_option(block.id(), input.id())?.id());
        }
        for option_id in option_ids {
            let mut patch = OptionPatch::new()
                .title(OPTION_TITLES.choose(rng).copied().unwrap_or("Option"))
                .price_adjustment(PriceAdjustment::from_cents(rng.random_range(-500..2500)));
            if kind.has_quantity() {
                patch = patch.quantity(rng.random_range(1..=4));
            }
            store.update_option(block.id(), input.id(), option_id, patch)?;
        }
    }
    println!("-> Generated block #{} with {} inputs.", block.id(), input_count);
    Ok(())
}

fn random_settings(rng: &mut ThreadRng) -> SettingsPatch {
    let key_type = if rng.random_bool(0.5) {
        KeyType::Same
    } else {
        KeyType::Custom
    };
    let kind = *[
        CustomOptionKind::Text,
        CustomOptionKind::Number,
        CustomOptionKind::Select,
    ]
    .choose(rng)
    .unwrap_or(&CustomOptionKind::Text);

    SettingsPatch::new()
        .key_type(key_type)
        .fabrication(rng.random_bool(0.3))
        .additional_keys(rng.random_range(0..4))
        .custom_option_name("Engraving text")
        .custom_option_kind(kind)
}
