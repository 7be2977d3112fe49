use chrono::{DateTime, Local, Utc};
use console::{Alignment, StyledObject, pad_str, style};

use client::poller::{PollPhase, PollSnapshot, StopReason};
use common::submission::SubmissionRecord;
use common::{
    Contest, ContestDetail, ContestStatus, Difficulty, Problem, ScoreboardEntry, StatusTone,
    Submission, SubmissionStatus,
};

pub fn styled_status(status: &SubmissionStatus) -> StyledObject<String> {
    let label = style(status.to_string()).bold();
    match StatusTone::of(status) {
        StatusTone::Success => label.green(),
        StatusTone::Failure => label.red(),
        StatusTone::Neutral => label.dim(),
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn print_progress(submission: &Submission) {
    println!("{} {}", style(submission.id()).cyan(), styled_status(submission.status()));
}

pub fn print_submission(submission: &Submission) {
    let head = submission.head();
    let title = if head.problem.title.is_empty() {
        head.problem.id.as_str()
    } else {
        head.problem.title.as_str()
    };

    println!("{}  {}", style(title).bold(), styled_status(&head.status));
    println!("  Submission     {}", head.id);
    println!("  Language       {}", head.language.to_uppercase());
    println!("  Submitted      {}", local_time(head.created_at));
    if let Some(outcome) = submission.outcome() {
        if let Some(ms) = outcome.execution_time_ms {
            println!("  Execution time {ms} ms");
        }
        if let Some(memory) = outcome.memory_used {
            println!("  Memory used    {memory}");
        }
    }
}

pub fn print_snapshot(snapshot: &PollSnapshot) {
    if let Some(submission) = &snapshot.submission {
        print_submission(submission);
    }
    match &snapshot.phase {
        PollPhase::Stopped(StopReason::Failed(message)) => {
            eprintln!("{} {}", style("Error:").red().bold(), message);
        }
        PollPhase::Stopped(StopReason::Cancelled) => {
            eprintln!("{}", style("Stopped following submission.").dim());
        }
        _ => {}
    }
}

pub fn print_history(records: Vec<SubmissionRecord>) {
    if records.is_empty() {
        println!("{}", style("No submissions yet.").dim());
        return;
    }
    for record in records {
        let submission = Submission::from(record);
        let head = submission.head();
        println!(
            "{} {:<10} {}",
            pad_str(&styled_status(&head.status).to_string(), 20, Alignment::Left, None),
            head.language.to_uppercase(),
            local_time(head.created_at)
        );
    }
}

fn styled_contest_status(status: ContestStatus) -> StyledObject<&'static str> {
    match status {
        ContestStatus::Upcoming => style(status.as_str()).yellow(),
        ContestStatus::Running => style(status.as_str()).green(),
        ContestStatus::Finished => style(status.as_str()).dim(),
    }
}

fn styled_difficulty(difficulty: Difficulty) -> StyledObject<&'static str> {
    match difficulty {
        Difficulty::Easy => style(difficulty.as_str()).green(),
        Difficulty::Medium => style(difficulty.as_str()).yellow(),
        Difficulty::Hard => style(difficulty.as_str()).red(),
        Difficulty::Other => style(difficulty.as_str()).dim(),
    }
}

pub fn print_problems(problems: &[&Problem]) {
    if problems.is_empty() {
        println!("{}", style("No problems.").dim());
        return;
    }
    for problem in problems {
        println!(
            "{} {}  {}",
            pad_str(&styled_difficulty(problem.difficulty).to_string(), 7, Alignment::Left, None),
            style(&problem.title).bold(),
            style(&problem.id).dim()
        );
    }
}

pub fn print_problem(problem: &Problem) {
    println!("{}  {}", style(&problem.title).bold(), styled_difficulty(problem.difficulty));
    println!("  Time limit     {}s", problem.time_limit);
    println!("  Memory limit   {}MB", problem.memory_limit);
    if !problem.description.is_empty() {
        println!();
        println!("{}", problem.description);
    }
}

pub fn print_contest(detail: &ContestDetail, now: DateTime<Utc>) {
    let contest = &detail.contest;
    println!(
        "{}  {}",
        style(&contest.title).bold(),
        styled_contest_status(contest.status_at(now))
    );
    println!("  Starts         {}", local_time(contest.start_time));
    println!("  Ends           {}", local_time(contest.end_time));
    if !contest.creator.name.is_empty() {
        println!("  Created by     {}", contest.creator.name);
    }
    println!("  Participants   {}", detail.participants.len());
    if !contest.description.is_empty() {
        println!();
        println!("{}", contest.description);
    }
    if !detail.problems.is_empty() {
        println!();
        for slot in &detail.problems {
            println!(
                "  {} {}  {}",
                style(&slot.alias).bold(),
                slot.problem.title,
                style(&slot.problem.id).dim()
            );
        }
    }
}

pub fn print_scoreboard(rows: &[ScoreboardEntry]) {
    if rows.is_empty() {
        println!("{}", style("No participants yet.").dim());
        return;
    }
    let header = format!("{:>4}  {:<24} {:>6} {:>8}", "#", "Name", "Solved", "Penalty");
    println!("{}", style(header).bold());
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:>4}  {:<24} {:>6} {:>8}",
            rank + 1,
            row.name,
            row.problems_solved,
            row.total_penalty
        );
    }
}

pub fn print_contests(contests: &[&Contest], now: DateTime<Utc>) {
    if contests.is_empty() {
        println!("{}", style("No contests.").dim());
        return;
    }
    for contest in contests {
        let label = styled_contest_status(contest.status_at(now));
        println!(
            "{} {}  {} - {}",
            pad_str(&label.to_string(), 9, Alignment::Left, None),
            style(&contest.title).bold(),
            local_time(contest.start_time),
            local_time(contest.end_time)
        );
    }
}
