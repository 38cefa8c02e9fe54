//! Thin interactive wrapper around the encounter core. All terminal I/O and
//! text parsing live here; the core only ever sees validated intents and
//! answers with structured events.

use std::io::{self, Write};

use tracing::debug;

use crate::battle::encounter::{Encounter, PlayerIntent};
use crate::battle::state::{EncounterEvent, EncounterRng};
use crate::creature::Creature;
use crate::species::Species;
use crate::trainer::Trainer;

/// Starters join the roster at this requested level.
const STARTER_LEVEL: u16 = 5;

/// Top-level game loop: trainer creation, then the overworld menu until the
/// player quits or input closes.
pub fn run_game(rng: &mut EncounterRng, trainer_name: Option<String>) -> io::Result<()> {
    let mut trainer = interview(trainer_name)?;
    loop {
        println!();
        let choice = prompt("Explore, center, team, or quit?")?;
        match choice.trim().to_lowercase().as_str() {
            "explore" => explore(&mut trainer, rng)?,
            "center" => visit_center(&mut trainer),
            "team" => print_team(&trainer),
            "quit" => break,
            other => println!("Sorry, \"{}\" is not a valid choice. Try again.", other),
        }
    }
    Ok(())
}

fn interview(trainer_name: Option<String>) -> io::Result<Trainer> {
    let name = match trainer_name {
        Some(name) => name,
        None => prompt("What is your name?")?.trim().to_string(),
    };
    let mut trainer = Trainer::new(name);
    println!("{}", "-".repeat(80));
    println!("\nHello there {}! Welcome to Creature Adventure!", trainer.name());
    println!("It's dangerous to go alone! Choose a starter creature.");
    println!("Your choices are:");
    for (slot, species) in Species::STARTERS.iter().enumerate() {
        println!("\t{}) {}, a {}-type creature", slot + 1, species, species.element());
    }
    let starter = loop {
        let choice = prompt("Type the number for your choice")?;
        match choice.trim().parse::<usize>() {
            Ok(number) if (1..=Species::STARTERS.len()).contains(&number) => {
                break Species::STARTERS[number - 1];
            }
            _ => println!("Sorry, \"{}\" is not a valid choice. Try again.", choice.trim()),
        }
    };
    let mut creature = Creature::new(starter, STARTER_LEVEL);
    let nickname = prompt(&format!("What would you like to name your {}?", creature.name()))?;
    if !nickname.trim().is_empty() {
        creature.set_nickname(nickname.trim());
    }
    if let Err((error, _)) = trainer.add_creature(creature) {
        // A brand-new roster always has room; nothing to do but report.
        println!("{}", error);
    }
    println!("You're all set. Now go on out there and catch some creatures.");
    Ok(trainer)
}

fn explore(trainer: &mut Trainer, rng: &mut EncounterRng) -> io::Result<()> {
    let Some((mut encounter, events)) = Encounter::start(trainer, rng) else {
        println!("You have no healthy creatures! Visit a creature center to heal your team.");
        return Ok(());
    };
    print_events(&events);

    let roster_before = trainer.roster().len();
    while !encounter.is_over() {
        let intent = if encounter.needs_replacement() {
            PlayerIntent::Switch { roster_index: choose_switch_target(trainer)? }
        } else {
            read_intent(trainer, &encounter)?
        };
        let events = encounter.process_intent(trainer, intent, rng);
        print_events(&events);
    }

    if trainer.roster().len() > roster_before {
        offer_nickname(trainer)?;
    }
    Ok(())
}

fn read_intent(trainer: &Trainer, encounter: &Encounter) -> io::Result<PlayerIntent> {
    loop {
        println!("\nRun, fight, capture, switch, or status?");
        let strategy = prompt("")?;
        match strategy.trim().to_lowercase().as_str() {
            "run" => return Ok(PlayerIntent::Run),
            "fight" => {
                return Ok(PlayerIntent::Fight { move_index: choose_move(trainer, encounter)? })
            }
            "capture" => return Ok(PlayerIntent::Capture),
            "switch" => {
                return Ok(PlayerIntent::Switch { roster_index: choose_switch_target(trainer)? })
            }
            "status" => return Ok(PlayerIntent::Status),
            _ => println!(
                "Sorry, invalid move. Please type either 'run', 'fight', 'capture', 'switch', or 'status'."
            ),
        }
    }
}

/// Pick among the active creature's moves with uses left; None falls back to
/// the core's random choice (which is Struggle once everything is spent).
fn choose_move(trainer: &Trainer, encounter: &Encounter) -> io::Result<Option<usize>> {
    let Some(active) = trainer.creature(encounter.active_index()) else {
        return Ok(None);
    };
    let usable = active.usable_moves();
    if usable.is_empty() {
        println!("No moves left!");
        return Ok(None);
    }
    println!("Choose a move!");
    let list = || {
        for (slot, &index) in usable.iter().enumerate() {
            if let Some(instance) = active.move_at(index) {
                let data = instance.id.data();
                println!(
                    "\t{}) {}: type {}, power {}, remaining uses: {}",
                    slot + 1,
                    data.name,
                    data.element,
                    data.power,
                    instance.uses()
                );
            }
        }
    };
    list();
    loop {
        let choice = prompt("Enter number of move, or 'list' to see your choices")?;
        let trimmed = choice.trim();
        if trimmed == "list" {
            list();
            continue;
        }
        match trimmed.parse::<usize>() {
            Ok(number) if (1..=usable.len()).contains(&number) => {
                return Ok(Some(usable[number - 1]));
            }
            _ => println!("Sorry, that's not a move."),
        }
    }
}

fn choose_switch_target(trainer: &Trainer) -> io::Result<usize> {
    let healthy = trainer.healthy_members();
    println!("Choose a creature to send out!");
    let list = || {
        for (slot, &index) in healthy.iter().enumerate() {
            let creature = &trainer.roster()[index];
            println!(
                "\t{}) {}: species {}, type {}, {} HP remaining",
                slot + 1,
                creature.name(),
                creature.species(),
                creature.element(),
                creature.hp()
            );
        }
    };
    list();
    loop {
        let choice = prompt("Enter number for your choice, or 'list' to see your choices")?;
        let trimmed = choice.trim();
        if trimmed == "list" {
            list();
            continue;
        }
        match trimmed.parse::<usize>() {
            Ok(number) if (1..=healthy.len()).contains(&number) => {
                return Ok(healthy[number - 1]);
            }
            _ => println!("Sorry, that's not a valid choice."),
        }
    }
}

fn offer_nickname(trainer: &mut Trainer) -> io::Result<()> {
    let Some(caught) = trainer.newest_mut() else { return Ok(()) };
    let nickname = prompt(&format!("What would you like to call your new {}?", caught.name()))?;
    if !nickname.trim().is_empty() {
        caught.set_nickname(nickname.trim());
    }
    Ok(())
}

fn visit_center(trainer: &mut Trainer) {
    println!("Hello! Welcome to the Creature Center! We'll heal your creatures right up.");
    trainer.heal_roster();
    for creature in trainer.roster() {
        println!("Your {} is feeling much better now!", creature.name());
    }
    println!("You're good to go! Have fun!");
}

fn print_team(trainer: &Trainer) {
    if trainer.roster().is_empty() {
        println!("Your roster is empty.");
        return;
    }
    for creature in trainer.roster() {
        println!(
            "{}: species {}, type {}, level {}, {}/{} HP",
            creature.name(),
            creature.species(),
            creature.element(),
            creature.level(),
            creature.hp(),
            creature.max_hp()
        );
    }
}

fn print_events(events: &[EncounterEvent]) {
    for event in events {
        match serde_json::to_string(event) {
            Ok(json) => debug!(target: "events", %json),
            Err(error) => debug!(target: "events", %error, "event serialization failed"),
        }
        if let Some(line) = event.format() {
            println!("{}", line);
        }
    }
}

fn prompt(message: &str) -> io::Result<String> {
    if message.is_empty() {
        print!("> ");
    } else {
        print!("{}> ", message);
    }
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line)
}
