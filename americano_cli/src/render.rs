//! Plain-text views printed at the prompt.

use americano::{
    GameMode, RankingEntry, ScheduleDefinition,
    entitlement::ModeAccess,
    tournament::{CompetitorSlot, CourtView},
};
use std::fmt::Write;

fn names(side: &[CompetitorSlot]) -> String {
    side.iter()
        .map(|c| format!("{} ({})", c.label, c.index))
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Courts of one round.
pub fn round(number: usize, round_count: usize, courts: &[CourtView]) -> String {
    let mut out = format!("Round {number}/{round_count}\n");
    for court in courts {
        let score = court
            .result
            .map(|(a, b)| format!("  [{a}-{b}]"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  Court {}: {}  vs  {}{score}",
            court.court,
            names(&court.team1),
            names(&court.team2)
        );
    }
    out
}

pub fn ranking(entries: &[RankingEntry]) -> String {
    let width = entries.iter().map(|e| e.label.len()).max().unwrap_or(0);
    let mut out = String::from("Ranking\n");
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:>2}. {:<width$}  {:>4}",
            entry.position, entry.label, entry.score
        );
    }
    out
}

pub fn audit(schedule: &ScheduleDefinition) -> String {
    let audit = schedule.audit();
    let mut out = format!(
        "{}: {} rounds, every competitor plays every round: {}\n",
        schedule.mode(),
        schedule.round_count(),
        if schedule.has_full_participation() { "yes" } else { "no" }
    );
    if audit.is_clean() {
        out.push_str("  every pairing meets exactly once\n");
        return out;
    }
    for ((a, b), count) in &audit.repeated {
        let _ = writeln!(out, "  {a}-{b} meet {count} times");
    }
    if !audit.missing.is_empty() {
        let missing: Vec<String> = audit.missing.iter().map(|(a, b)| format!("{a}-{b}")).collect();
        let _ = writeln!(out, "  never meet: {}", missing.join(", "));
    }
    out
}

/// Mode picker with the caller's access to each.
pub fn modes(access: &[(GameMode, ModeAccess)]) -> String {
    let mut out = String::from("Modes\n");
    for (mode, access) in access {
        let note = match access {
            ModeAccess::Granted => "",
            ModeAccess::LoginRequired => "  (premium, sign in with --user)",
            ModeAccess::PremiumRequired => "  (premium)",
        };
        let _ = writeln!(out, "  {:<14} {}{note}", mode.id(), mode.title());
    }
    out
}
