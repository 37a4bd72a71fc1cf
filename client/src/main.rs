use clap::Parser;
use client::menu::{self, Console};
use client::Client;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:12345")]
    server: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    info!("Connecting to: {}", args.server);
    let mut client = Client::connect(&args.server).await?;

    println!("Please wait to join the Hangman Online Game Lobby.");
    println!("You have been placed in a queue.");
    client.wait_until_served().await?;

    let mut console = Console::new();
    println!("\n=====================================================================================\n");
    println!("                                  Please login to play.\n");
    println!("=====================================================================================\n");

    let username = console.prompt("Enter your username: ").await?.unwrap_or_default();
    let password = console.prompt("Enter your password: ").await?.unwrap_or_default();

    if !client.login(&username, &password).await? {
        println!("Login failed. You have entered either an incorrect username or password.");
        println!("You will now be disconnected from the server...");
        return Ok(());
    }

    println!("\nLogin successful. Welcome to the online hangman gaming system.");
    menu::run(&mut client, &mut console).await?;

    client.quit().await?;
    println!("\nThanks for playing! Good-bye!");

    Ok(())
}
