use anyhow::{Context, Result};
use etut_core::{Config, Language};

pub async fn execute(language: Option<String>) -> Result<()> {
    let translator = super::translator();

    let Some(language) = language else {
        println!(
            "🌐 {}",
            translator.format(
                "command.lang_current",
                &[("language", translator.language().display_name())],
            )
        );
        return Ok(());
    };

    let language: Language = language.parse()?;

    Config::save_language(language).context("failed to update the config file")?;

    // Confirm in the newly selected language.
    let translator = etut_core::Translator::new(language);
    println!(
        "🌐 {}",
        translator.format("command.lang_set", &[("language", language.display_name())])
    );

    Ok(())
}
