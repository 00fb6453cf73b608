use std::{io, process::exit};

use anyhow::{Context, bail};
use colored::{ColoredString, Colorize};
use itertools::Itertools;
use liblife::{Simulation, SimulationState, StepOutcome, board::CellState};

pub fn run_cli(mut simulation: Simulation) {
    render(&simulation.snapshot());

    for line_res in io::stdin().lines() {
        let line = line_res.unwrap();
        let args = line.split_whitespace();

        if let Err(e) = handle_cmd(&mut simulation, args) {
            eprintln!("! {e:?}");
        }
    }
}

fn handle_cmd<'a, I>(simulation: &mut Simulation, mut args: I) -> anyhow::Result<()>
where
    I: Iterator<Item = &'a str>,
{
    match args.next().context("No command")? {
        "play" => {
            simulation.play();
        }

        "pause" => {
            simulation.pause();
        }

        "clear" => {
            simulation.clear();
        }

        "toggle" => {
            let row = args.next().context("missing row")?.parse::<usize>()?;
            let col = args.next().context("missing col")?.parse::<usize>()?;

            simulation.toggle_cell(row, col)?;
        }

        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            for _ in 0..times {
                if simulation.step() == StepOutcome::Extinct {
                    break;
                }
            }
            render(&simulation.snapshot());
        }

        "random" => {
            simulation.randomize();
            render(&simulation.snapshot());
        }

        "show" => {
            render(&simulation.snapshot());
        }

        "exit" => {
            exit(0);
        }

        _ => bail!("Unknown command"),
    }

    println!("OK");
    Ok(())
}

fn render(snapshot: &SimulationState) {
    let status = if snapshot.running {
        "running".green()
    } else if snapshot.cleared {
        "cleared".yellow()
    } else {
        "paused".yellow()
    };

    println!(
        "{} {} | {status} | {} living",
        "generation".bold(),
        snapshot.generation,
        snapshot.board.living_count(),
    );

    for row in snapshot.board.iter_rows() {
        let line = row.iter().map(|cell| glyph(*cell)).join("");
        println!("{line}");
    }
}

fn glyph(cell: CellState) -> ColoredString {
    match cell {
        CellState::Dead => ".".dimmed(),
        CellState::Alive => "o".white().bold(),
        CellState::Old => "o".green(),
    }
}
