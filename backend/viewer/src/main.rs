use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tracing_subscriber::{EnvFilter, fmt};
use viewer::{
    api::ProxyClient,
    command::{Command, HELP},
    render,
    view::{HeroView, Query, Request},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Search once and exit instead of prompting.
    keyword: Option<String>,

    #[arg(long, default_value = "http://localhost:3000")]
    proxy: String,

    #[arg(long)]
    role: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ProxyClient::new(&args.proxy);

    let mut view = HeroView::new();
    view.set_role_filter(args.role);

    let request = view.mount();
    run(&client, &mut view, request).await?;

    if let Some(keyword) = args.keyword {
        view.set_keyword(keyword);
        let request = view.submit();
        run(&client, &mut view, request).await?;

        println!("{}", render::grid(&view));
        return Ok(());
    }

    println!("{}\n", render::grid(&view));
    println!("Type :help for commands.");

    let mut lines = BufReader::new(stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Search(keyword) => {
                view.set_keyword(keyword);
                let request = view.submit();
                run(&client, &mut view, request).await?;
                println!("{}", render::grid(&view));
            }
            Command::All => {
                let request = view.browse_all();
                run(&client, &mut view, request).await?;
                println!("{}", render::grid(&view));
            }
            Command::Open(n) => {
                let picked = view.visible().get(n.wrapping_sub(1)).map(|h| (*h).clone());

                match picked {
                    Some(hero) => {
                        println!("{}", render::detail(&hero));
                        view.select(hero);
                    }
                    None => println!("No hero #{n}"),
                }
            }
            Command::Close => {
                view.close_modal();
                println!("{}", render::grid(&view));
            }
            Command::Role(role) => {
                view.set_role_filter(role);
                println!("{}", render::grid(&view));
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(input) => println!("Unknown command {input}, try :help"),
        }
    }

    Ok(())
}

async fn run(client: &ProxyClient, view: &mut HeroView, request: Request) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(match &request.query {
        Query::List => "Loading heroes...".to_string(),
        Query::Search(keyword) => format!("Searching {keyword}..."),
    });

    let outcome = client.execute(&request.query).await;

    pb.finish_and_clear();
    view.apply(request.ticket, outcome);

    Ok(())
}
