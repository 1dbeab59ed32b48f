use colored::*;

use crate::terminal::{colors, format, print};
use ip2provider_common::config::Config;
use ip2provider_core::provider::ProviderTable;
use ip2provider_core::store::{FileStorage, RangeStore};

pub fn list(providers: &ProviderTable, cfg: &Config) -> anyhow::Result<()> {
    let store = RangeStore::new(FileStorage::new(&cfg.data_dir));

    for (idx, descriptor) in providers.iter().enumerate() {
        let status = store.status(&descriptor.name)?;
        if cfg.quiet > 1 {
            print::print(&format!(
                "{} {}",
                descriptor.name,
                format::stored_status(&status)
            ));
            continue;
        }

        print::tree_head(idx, &format::display_name(&descriptor.name));
        print::as_tree_one_level(vec![
            ("Source".to_string(), descriptor.url.color(colors::SEPARATOR)),
            ("Stored".to_string(), format::stored_status(&status)),
        ]);
    }

    if cfg.quiet == 0 {
        print::set_key_width(8);
        print::aligned_line("Data dir", store.storage().root().display().to_string());
    }
    Ok(())
}
