use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use dogmatch::favorites::FavoritesStore;
use dogmatch::screen::{BrowseScreen, FavoritesScreen};
use dogmatch::storage::FileKeyValueStore;
use dogmatch::{Config, Dog, DogService, HttpGateway, SortOrder};

#[derive(Parser)]
#[command(name = "dogmatch", version, about = "Search adoptable dogs, keep favorites, get a match")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Dog service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Directory for persisted favorites
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Name used to log in
    #[arg(long, global = true)]
    name: Option<String>,
    /// Email used to log in
    #[arg(long, global = true)]
    email: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add or remove a dog from favorites
    Toggle { id: String },
    #[command(flatten)]
    Session(SessionCommand),
    /// Serve a catalog file over the dog service's HTTP routes
    #[cfg(feature = "stub")]
    ServeStub {
        /// JSON array of dog records
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
}

/// Commands that talk to the dog service under a login session.
#[derive(Subcommand)]
enum SessionCommand {
    /// List every breed
    Breeds,
    /// Search dogs
    Search(SearchArgs),
    /// Show favorite dogs
    Favorites,
    /// Remove a dog from favorites
    Remove { id: String },
    /// Ask the service to pick a match among favorites
    Match,
}

#[derive(Args)]
struct SearchArgs {
    /// Breed filter, repeatable
    #[arg(long = "breed")]
    breeds: Vec<String>,
    /// asc or desc, by breed
    #[arg(long, default_value_t = SortOrder::Ascending)]
    sort: SortOrder,
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Zip code filter, repeatable
    #[arg(long = "zip")]
    zip_codes: Vec<String>,
    #[arg(long)]
    age_min: Option<u32>,
    #[arg(long)]
    age_max: Option<u32>,
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(name) = &self.name {
            config.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            config.email = Some(email.clone());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dogmatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;

    match cli.command {
        #[cfg(feature = "stub")]
        Command::ServeStub { catalog, addr } => serve_stub(&catalog, &addr).await,
        Command::Toggle { id } => {
            let favorites = FavoritesStore::new(config.store());
            let now_favorite = favorites.toggle(&id)?;
            println!(
                "{} {} favorites",
                id,
                if now_favorite { "added to" } else { "removed from" }
            );
            Ok(())
        }
        Command::Session(command) => {
            let gateway = HttpGateway::new(config.base_url.clone())?;
            let (name, email) = config.credentials()?;
            gateway.login(name, email).await.context("login failed")?;
            let result = run(&gateway, FavoritesStore::new(config.store()), command).await;
            if let Err(e) = gateway.logout().await {
                warn!(error = %e, "logout failed");
            }
            result
        }
    }
}

async fn run(
    gateway: &HttpGateway,
    favorites: FavoritesStore<FileKeyValueStore>,
    command: SessionCommand,
) -> anyhow::Result<()> {
    match command {
        SessionCommand::Breeds => {
            let mut browse = BrowseScreen::new(gateway.clone(), favorites);
            browse.load_breed_list().await;
            for breed in browse.breeds() {
                println!("{}", breed);
            }
        }
        SessionCommand::Search(args) => {
            let mut browse = BrowseScreen::new(gateway.clone(), favorites);
            let query = browse.query_mut();
            query.set_breeds(args.breeds);
            query.set_sort(args.sort);
            query.set_zip_codes(args.zip_codes);
            query.set_age_range(args.age_min, args.age_max);
            browse.mount().await;
            if args.page > 1 {
                browse.go_to_page(args.page).await;
            }
            println!(
                "Page {} of {} ({} favorites)",
                browse.query().page(),
                browse.total_pages().max(1),
                browse.favorite_count()
            );
            for dog in browse.dogs() {
                print_dog(dog, browse.is_favorite(&dog.id));
            }
        }
        SessionCommand::Favorites => {
            let mut screen = FavoritesScreen::new(gateway.clone(), favorites);
            screen.load_favorites().await;
            if screen.favorites().is_empty() {
                println!("No favorite dogs yet.");
            }
            for dog in screen.favorites() {
                print_dog(dog, true);
            }
        }
        SessionCommand::Remove { id } => {
            let mut screen = FavoritesScreen::new(gateway.clone(), favorites);
            screen.load_favorites().await;
            if screen.remove_favorite(&id)? {
                println!("{} removed, {} favorites left", id, screen.favorites().len());
            } else {
                println!("{} was not a favorite", id);
            }
        }
        SessionCommand::Match => {
            let mut screen = FavoritesScreen::new(gateway.clone(), favorites);
            screen.load_favorites().await;
            match screen.generate_match().await {
                Some(outcome) => println!("{}", outcome.announcement()),
                None => println!("No match generated."),
            }
        }
    }
    Ok(())
}

fn print_dog(dog: &Dog, favorite: bool) {
    let marker = if favorite { "*" } else { " " };
    println!(
        "{} {:<24} {:<20} age {:<3} zip {} [{}]",
        marker, dog.name, dog.breed, dog.age, dog.zip_code, dog.id
    );
}

#[cfg(feature = "stub")]
async fn serve_stub(catalog: &std::path::Path, addr: &str) -> anyhow::Result<()> {
    use dogmatch::gateway::{stub, InMemoryDogService};

    let raw = tokio::fs::read_to_string(catalog)
        .await
        .with_context(|| format!("reading {}", catalog.display()))?;
    let dogs: Vec<Dog> = serde_json::from_str(&raw).context("parsing catalog")?;
    tracing::info!(dogs = dogs.len(), addr, "serving stub dog service");
    stub::serve(InMemoryDogService::new(dogs), addr).await?;
    Ok(())
}
