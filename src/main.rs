use anyhow::{bail, Result};
use clap::Parser;
use dyninv::cli::Cli;
use dyninv::inventory::cache::InventoryCache;
use dyninv::inventory::store::InventoryStore;
use dyninv::{datagen, exclude_hosts, filter_groups, output, populate_from_records};
use log::info;

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let cli = Cli::parse();
    let cache = InventoryCache::default();

    if cli.flush_cache {
        cache.delete()?;
    }

    let mut store = if cli.no_cache {
        InventoryStore::new()
    } else {
        cache.load()
    };

    if store.is_empty() {
        info!("Generating {} device records", cli.devices);
        populate_from_records(&mut store, datagen::generate(cli.devices));

        if !cli.no_cache {
            cache.save(&store)?;
        }
    }

    // filters shape the output only; the snapshot keeps the full inventory
    filter_groups(&mut store, &cli.filter_group);
    exclude_hosts(&mut store, &cli.exclude_host)?;

    let rendered = if cli.list {
        output::render_store(&store, cli.format)?
    } else if let Some(host) = &cli.host {
        output::render_vars(store.get_host(host), cli.format)?
    } else if let Some(group) = &cli.group {
        output::render_vars(store.get_group(group), cli.format)?
    } else {
        // clap's selector group makes this unreachable
        bail!("no selector given, use --list, --host or --group");
    };

    match &cli.export {
        Some(path) => {
            output::write_export(path, cli.format, &rendered)?;
            println!("Inventory written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
