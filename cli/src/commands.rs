use synergy_core::{Effect, Engine, SynergyPhase, UpgradeId};

use crate::console::ConsoleSurface;

/// Demo effect: logs every apply and cleanup
pub fn logging_effect(name: &str) -> Option<Effect> {
    let on_apply = name.to_string();
    let on_cleanup = name.to_string();
    Some(
        Effect::new(move || {
            tracing::info!("[EFFECT] Applying '{}'", on_apply);
            Ok(())
        })
        .with_cleanup(move || {
            tracing::info!("[EFFECT] Cleaning up '{}'", on_cleanup);
            Ok(())
        }),
    )
}

pub fn grant(engine: &mut Engine<ConsoleSurface>, upgrade: &str) -> Result<(), String> {
    let activated = engine.on_upgrade_granted(upgrade).map_err(|e| e.to_string())?;
    for id in activated {
        if let Some(def) = engine.registry().get(id) {
            println!("activated {}", def.name());
        }
    }
    Ok(())
}

pub fn poll(engine: &Engine<ConsoleSurface>) -> Result<(), String> {
    let applied = engine.poll_active().map_err(|e| e.to_string())?;
    println!("applied {applied} active synergies");
    Ok(())
}

pub fn new_game(engine: &mut Engine<ConsoleSurface>) -> Result<(), String> {
    let cleaned = engine.on_new_game().map_err(|e| e.to_string())?;
    println!("new game, {cleaned} synergies deactivated");
    Ok(())
}

pub fn status(engine: &Engine<ConsoleSurface>) {
    for status in engine.status() {
        let marker = match status.phase {
            SynergyPhase::Active => "*",
            SynergyPhase::Dormant => " ",
        };
        println!(
            "{} {:<24} {}/{}",
            marker, status.name, status.held, status.required
        );
    }

    let held: Vec<&str> = engine
        .held_upgrades()
        .into_iter()
        .map(UpgradeId::as_str)
        .collect();
    println!("held: [{}]", held.join(", "));
}

pub fn list(engine: &Engine<ConsoleSurface>) {
    for def in engine.registry().iter() {
        println!("{}: {}", def.name(), def.requirement_labels().join(" + "));
        if !def.description().is_empty() {
            println!("    {}", def.description());
        }
    }
}
