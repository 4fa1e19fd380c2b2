use anyhow::Result;
use matplan::{Config, FileStorage, Onboarding};

#[tracing::instrument(skip(config))]
pub fn show(config: Config, reset: bool) -> Result<()> {
    let mut onboarding = Onboarding::new(FileStorage::new(&config.storage.path));

    if reset {
        onboarding.reset()?;
        println!("Onboarding will be shown on next start");
        return Ok(());
    }

    if onboarding.has_been_shown()? {
        println!("Welcome back!");
        return Ok(());
    }

    println!("Welcome to matplan!");
    println!("  1. Browse recipes with `matplan catalog`");
    println!("  2. Plan your week with `matplan plan --meal monday=kottbullar`");
    println!("  3. Find dinners from what you have with `matplan pantry lök ägg`");
    onboarding.mark_shown()?;

    Ok(())
}
