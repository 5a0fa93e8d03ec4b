use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pawpal_core::{
    detect_conflicts, sort_by, time, Owner, Pet, Priority, PriorityGreedyScheduler, Schedule,
    SortKey, Task, TaskCategory, TaskFrequency,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod state;

use config::Config;
use state::Household;

#[derive(Parser, Debug)]
#[command(name = "pawpal", version, about = "Daily pet care planner")]
struct Cli {
    /// State directory (default: $PAWPAL_HOME or ~/.pawpal)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default config.toml and an empty household
    Init {
        #[arg(long, default_value = "Owner")]
        owner: String,

        /// Daily care budget in minutes
        #[arg(long, default_value_t = 120)]
        minutes: i32,
    },

    /// Manage pets
    Pet {
        #[command(subcommand)]
        command: PetCommand,
    },

    /// Manage care tasks
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Bulk-import tasks from CSV (pet,title,duration,priority,category[,frequency][,description])
    Import {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Build today's schedule
    Plan {
        /// Override the configured budget
        #[arg(long)]
        minutes: Option<i32>,

        /// Override the configured start time (HH:MM)
        #[arg(long)]
        start: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Also write the schedule JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Report overlapping slots in a schedule JSON file
    Check {
        #[arg(long)]
        schedule: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum PetCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        species: String,
        #[arg(long, default_value_t = 0.0)]
        age: f64,
    },
    Remove {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum TaskCommand {
    Add {
        #[arg(long)]
        pet: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        minutes: i32,
        /// low | medium | high | critical
        #[arg(long)]
        priority: Priority,
        /// walk | feeding | medication | grooming | enrichment
        #[arg(long)]
        category: TaskCategory,
        /// once | daily | weekly | monthly
        #[arg(long, default_value = "once")]
        frequency: TaskFrequency,
        #[arg(long)]
        description: Option<String>,
    },
    Remove {
        #[arg(long)]
        pet: String,
        #[arg(long)]
        title: String,
    },
    /// Mark a task done; recurring tasks come back on their next due date
    Complete {
        #[arg(long)]
        pet: String,
        #[arg(long)]
        title: String,
    },
    List {
        #[arg(long)]
        pet: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        category: Option<TaskCategory>,
        #[arg(long)]
        completed: Option<bool>,
        /// priority | duration | category
        #[arg(long)]
        sort: Option<SortKey>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("warn,pawpal_cli=info,pawpal_core=info,pawpal_ingest=info")
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let home = state::pawpal_home(cli.home.as_deref())?;

    match cli.command {
        Command::Init { owner, minutes } => init(&home, owner, minutes)?,

        Command::Pet { command } => {
            let mut household = Household::load(&state::household_path(&home))?;
            match command {
                PetCommand::Add { name, species, age } => {
                    if household.owner.pet(&name).is_some() {
                        bail!("pet '{name}' already exists");
                    }
                    household.owner.add_pet(Pet::new(&name, species).with_age(age));
                    println!("Added {name}");
                }
                PetCommand::Remove { name } => {
                    household
                        .owner
                        .remove_pet(&name)
                        .with_context(|| format!("no pet named '{name}'"))?;
                    println!("Removed {name}");
                }
            }
            household.save(&state::household_path(&home))?;
        }

        Command::Task { command } => task_command(&home, command)?,

        Command::Import { csv } => {
            let path = state::household_path(&home);
            let mut household = Household::load(&path)?;
            let report = pawpal_ingest::parse_tasks_csv(&csv)?;

            for s in &report.skipped {
                println!("skipped line {}: {}", s.line, s.reason);
            }
            let added = report.into_owner_pets(&mut household.owner);
            household.save(&path)?;
            println!("Imported {added} task(s) from {}", csv.display());
        }

        Command::Plan {
            minutes,
            start,
            json,
            out,
        } => plan(&home, minutes, start, json, out)?,

        Command::Check { schedule } => {
            let s = std::fs::read_to_string(&schedule)
                .with_context(|| format!("read {}", schedule.display()))?;
            let schedule: Schedule = serde_json::from_str(&s).context("parse schedule JSON")?;
            let conflicts = detect_conflicts(&schedule.scheduled_tasks);
            print!("{}", render::render_conflicts(&conflicts));
            if !conflicts.is_empty() {
                bail!("{} conflict(s) found", conflicts.len());
            }
        }
    }

    Ok(())
}

fn init(home: &Path, owner: String, minutes: i32) -> Result<()> {
    if minutes < 0 {
        bail!("--minutes must be non-negative");
    }
    state::ensure_dir(home)?;

    let mut cfg = Config::default();
    cfg.planning.available_minutes = minutes;
    let cfg_path = state::config_path(home);
    if config::init_config(&cfg_path, &cfg)? {
        println!("Wrote {}", cfg_path.display());
    } else {
        println!("Config already exists: {}", cfg_path.display());
    }

    let household_path = state::household_path(home);
    if household_path.exists() {
        println!("Household already exists: {}", household_path.display());
    } else {
        Household::new(Owner::new(owner, minutes)).save(&household_path)?;
        println!("Wrote {}", household_path.display());
    }
    Ok(())
}

fn task_command(home: &Path, command: TaskCommand) -> Result<()> {
    let path = state::household_path(home);
    let mut household = Household::load(&path)?;

    match command {
        TaskCommand::Add {
            pet,
            title,
            minutes,
            priority,
            category,
            frequency,
            description,
        } => {
            let mut task = Task::new(&title, minutes, priority, category).with_frequency(frequency);
            if let Some(d) = description {
                task = task.with_description(d);
            }
            task.validate()?;

            household
                .owner
                .pet_mut(&pet)
                .with_context(|| format!("no pet named '{pet}'"))?
                .add_task(task);
            println!("Added '{title}' for {pet}");
        }

        TaskCommand::Remove { pet, title } => {
            household
                .owner
                .pet_mut(&pet)
                .with_context(|| format!("no pet named '{pet}'"))?
                .remove_task(&title)
                .with_context(|| format!("{pet} has no task titled '{title}'"))?;
            println!("Removed '{title}' from {pet}");
        }

        TaskCommand::Complete { pet, title } => {
            let cfg = config::load_config(&state::config_path(home))?;
            let today = time::today_in(&cfg.planning.timezone)?;
            match household.complete_task(&pet, &title, today)? {
                Some(due) => println!("Completed '{title}' for {pet}; next occurrence due {due}"),
                None => println!("Completed '{title}' for {pet}"),
            }
        }

        TaskCommand::List {
            pet,
            priority,
            category,
            completed,
            sort,
        } => {
            for p in household.owner.pets.iter().filter(|p| pet.as_ref().is_none_or(|n| *n == p.name)) {
                let selected: Vec<Task> = p
                    .tasks
                    .iter()
                    .filter(|t| priority.is_none_or(|x| t.priority == x))
                    .filter(|t| category.is_none_or(|x| t.category == x))
                    .filter(|t| completed.is_none_or(|x| t.is_completed == x))
                    .cloned()
                    .collect();

                let ordered: Vec<&Task> = match sort {
                    Some(key) => sort_by(&selected, key),
                    None => selected.iter().collect(),
                };
                for t in ordered {
                    println!("{}", render::render_task_line(&p.name, t));
                }
            }
            return Ok(());
        }
    }

    household.save(&path)
}

fn plan(
    home: &Path,
    minutes: Option<i32>,
    start: Option<String>,
    json: bool,
    out: Option<PathBuf>,
) -> Result<()> {
    let cfg = config::load_config(&state::config_path(home))?;
    let path = state::household_path(home);
    let mut household = Household::load(&path)?;

    let today = time::today_in(&cfg.planning.timezone)?;
    let rolled = household.roll_over(today);
    if rolled > 0 {
        tracing::info!(rolled, %today, "recurring tasks due again");
        household.save(&path)?;
    }

    let start_time = time::parse_start_time(start.as_deref().unwrap_or(&cfg.planning.start_time))?;
    let mut owner = household.owner.clone();
    owner.available_time_minutes = minutes.unwrap_or(cfg.planning.available_minutes);
    owner.preferences = cfg.preferences.clone();

    let schedule = owner.plan(&PriorityGreedyScheduler::new(today), start_time)?;
    tracing::info!(
        scheduled = schedule.scheduled_tasks.len(),
        unscheduled = schedule.unscheduled.len(),
        "schedule generated"
    );

    let schedule_json = serde_json::to_string_pretty(&schedule)?;
    if let Some(out) = out {
        std::fs::write(&out, &schedule_json).with_context(|| format!("write {}", out.display()))?;
        tracing::info!(path = %out.display(), "schedule written");
    }

    if json {
        println!("{schedule_json}");
    } else {
        print!("{}", render::render_owner_summary(&owner, owner.available_time_minutes));
        println!();
        print!("{}", render::render_schedule(&schedule));
        println!();
        print!("{}", render::render_conflicts(&schedule.conflicts()));
    }
    Ok(())
}
