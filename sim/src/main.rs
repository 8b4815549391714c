//! Batch battle simulator for balance work.
//!
//! Runs many seeded battles in parallel and prints aggregate outcome
//! statistics, either human readable or as json. Battle `i` uses seed
//! `base + i`, so any single battle from a report can be replayed on its
//! own.

use std::process;

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use questline_core::{
    monster_for_level, monster_template, roster, standard_catalog, standard_effects,
    standard_player, BattleError, BattleResult, BattleSession, Combatant, Winner,
};

#[derive(Parser)]
#[command(name = "questline-sim")]
#[command(about = "Batch auto-battle simulator for the questline engine")]
struct Cli {
    /// Number of battles to run
    #[arg(long, default_value_t = 1000)]
    battles: u64,

    /// Base seed; battle i runs with seed base + i
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Player level; also picks the closest roster monster by default
    #[arg(long, default_value_t = 5)]
    level: u32,

    /// Fight a specific roster monster instead of the level match
    #[arg(long)]
    monster: Option<String>,

    /// Emit the report as json
    #[arg(long)]
    json: bool,

    /// List the monster roster and exit
    #[arg(long)]
    list: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    battles: u64,
    player: String,
    enemy: String,
    player_wins: u64,
    enemy_wins: u64,
    draws: u64,
    win_rate: f64,
    avg_rounds: f64,
    avg_actions: f64,
    best_combo: u32,
    avg_experience: f64,
    avg_gold: f64,
    item_drop_rate: f64,
}

fn summarize(results: &[BattleResult], player: &str, enemy: &str) -> Report {
    let battles = results.len() as u64;
    let mut player_wins = 0u64;
    let mut enemy_wins = 0u64;
    let mut draws = 0u64;
    let mut total_rounds = 0u64;
    let mut total_actions = 0u64;
    let mut best_combo = 0u32;
    let mut total_experience = 0i64;
    let mut total_gold = 0i64;
    let mut items = 0u64;

    for result in results {
        match result.winner {
            Winner::Player => player_wins += 1,
            Winner::Enemy => enemy_wins += 1,
            Winner::None => draws += 1,
        }
        total_rounds += result.rounds as u64;
        total_actions += result.actions.len() as u64;
        let combo = result.actions.iter().map(|a| a.combo).max().unwrap_or(0);
        best_combo = best_combo.max(combo);
        if let Some(rewards) = &result.rewards {
            total_experience += rewards.experience as i64;
            total_gold += rewards.gold as i64;
            if rewards.item_dropped {
                items += 1;
            }
        }
    }

    let denom = battles.max(1) as f64;
    let per_win = |total: i64| {
        if player_wins > 0 {
            total as f64 / player_wins as f64
        } else {
            0.0
        }
    };
    Report {
        battles,
        player: player.to_string(),
        enemy: enemy.to_string(),
        player_wins,
        enemy_wins,
        draws,
        win_rate: player_wins as f64 / denom,
        avg_rounds: total_rounds as f64 / denom,
        avg_actions: total_actions as f64 / denom,
        best_combo,
        avg_experience: per_win(total_experience),
        avg_gold: per_win(total_gold),
        item_drop_rate: if player_wins > 0 {
            items as f64 / player_wins as f64
        } else {
            0.0
        },
    }
}

fn print_report(report: &Report) {
    println!(
        "{} battles: {} vs {}",
        report.battles, report.player, report.enemy
    );
    println!(
        "  player wins  {:>6} ({:.1}%)",
        report.player_wins,
        report.win_rate * 100.0
    );
    println!("  enemy wins   {:>6}", report.enemy_wins);
    println!("  draws        {:>6}", report.draws);
    println!("  avg rounds   {:>8.1}", report.avg_rounds);
    println!("  avg actions  {:>8.1}", report.avg_actions);
    println!("  best combo   {:>6}", report.best_combo);
    println!(
        "  per win      {:.1} exp, {:.1} gold, {:.1}% item drop",
        report.avg_experience,
        report.avg_gold,
        report.item_drop_rate * 100.0
    );
}

/// Seed for battle `index`. Wraps around so every base seed, including
/// values near `u64::MAX`, yields a full run of distinct seeds.
fn battle_seed(base: u64, index: u64) -> u64 {
    base.wrapping_add(index)
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        for template in roster() {
            println!("{:<16} level {:>2}  {}", template.id, template.stats.level, template.name);
        }
        return;
    }

    let catalog = standard_catalog();
    let registry = standard_effects();
    let profile = standard_player(cli.level);

    let template = match &cli.monster {
        Some(id) => match monster_template(id) {
            Some(template) => template,
            None => {
                eprintln!("unknown monster {:?}; try --list", id);
                process::exit(2);
            }
        },
        None => match monster_for_level(cli.level) {
            Some(template) => template,
            None => {
                eprintln!("the roster is empty");
                process::exit(2);
            }
        },
    };

    let player = match Combatant::from_player_profile(&profile, &catalog) {
        Ok(player) => player,
        Err(err) => {
            eprintln!("player setup failed: {err}");
            process::exit(1);
        }
    };
    let enemy = match Combatant::from_monster_template(&template, &catalog) {
        Ok(enemy) => enemy,
        Err(err) => {
            eprintln!("enemy setup failed: {err}");
            process::exit(1);
        }
    };
    let player_name = player.name.clone();
    let enemy_name = enemy.name.clone();

    let results: Result<Vec<BattleResult>, BattleError> = (0..cli.battles)
        .into_par_iter()
        .map(|i| {
            BattleSession::seeded(
                player.clone(),
                enemy.clone(),
                registry.clone(),
                battle_seed(cli.seed, i),
            )
            .map(|mut session| session.run())
        })
        .collect();
    let results = match results {
        Ok(results) => results,
        Err(err) => {
            eprintln!("battle setup failed: {err}");
            process::exit(1);
        }
    };

    let report = summarize(&results, &player_name, &enemy_name);
    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to encode the report: {err}");
                process::exit(1);
            }
        }
    } else {
        print_report(&report);
    }
}
