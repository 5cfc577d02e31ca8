use std::io::{self, Read, Write};
use std::path::Path;
use std::{env, fs};

use anyhow::{anyhow, Context};
use clap::Parser;
use layout_tree::cli::{Cli, Command, NodePath};
use layout_tree::layout::{self, Tree};
use layout_tree_config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "layout_tree=info".to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_env_filter(env_filter)
        .init();

    let mut stdout = io::stdout().lock();

    if cli.command == Command::New {
        // miette reports don't implement std::error::Error.
        let config =
            Config::load_or_default(cli.config.as_deref()).map_err(|err| anyhow!("{err:?}"))?;
        let tree = Tree::from_config(&config);
        return print_tree(&mut stdout, &tree, cli.pretty);
    }

    let tree = read_tree(cli.input.as_deref())?;

    if let Some(edited) = cli.command.edit(&tree) {
        if edited.same_version(&tree) {
            tracing::info!("{:?} did not change the tree", cli.command);
        }
        return print_tree(&mut stdout, &edited, cli.pretty);
    }

    match &cli.command {
        Command::Show => write!(stdout, "{}", tree.debug_tree())?,
        Command::Validate => writeln!(stdout, "ok: {} windows", tree.window_count())?,
        Command::Sibling { path, direction } => match tree.find_sibling_path(path, *direction) {
            Some(found) => writeln!(stdout, "{}", NodePath(found))?,
            None => anyhow::bail!("no window {direction} of {path}"),
        },
        Command::Find { key } => {
            let path = tree
                .find(|window| window.key() == key)
                .and_then(|window| tree.find_window_path(&window));
            match path {
                Some(path) => writeln!(stdout, "{}", NodePath(path))?,
                None => anyhow::bail!("no window with key {key:?}"),
            }
        }
        Command::New
        | Command::Split { .. }
        | Command::Remove { .. }
        | Command::Update { .. }
        | Command::Swap { .. }
        | Command::MoveBefore { .. }
        | Command::MoveAfter { .. } => unreachable!("{:?} is handled above", cli.command),
    }

    Ok(())
}

fn read_tree(input: Option<&Path>) -> anyhow::Result<Tree> {
    let json = match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("error reading {path:?}"))?
        }
        None => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("error reading stdin")?;
            json
        }
    };

    layout::deserialize(&json).context("error parsing layout tree")
}

fn print_tree(out: &mut impl Write, tree: &Tree, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(tree)?
    } else {
        layout::serialize(tree)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}
