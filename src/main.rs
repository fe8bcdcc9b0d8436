use clap::Parser;
use storyweaver::models::{Config, StoryRequest};
use storyweaver::story::StoryService;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storyweaver")]
#[command(about = "Generate a short story from a handful of words")]
struct CliArgs {
    /// Words to weave into the story, e.g. "cat, moon".
    #[arg(value_name = "WORDS")]
    words: Option<String>,

    /// Optional genre for the story.
    #[arg(short, long)]
    genre: Option<String>,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so the story itself stays clean on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyweaver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    info!("Starting storyweaver");

    let config = Config::from_env();
    let service = StoryService::from_config(&config);

    let request = StoryRequest::new(args.words.unwrap_or_default(), args.genre);
    let story = service.generate(&request).await;

    println!("{story}");
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_parse_words_and_genre() {
        let args =
            CliArgs::try_parse_from(["storyweaver", "cat, moon", "--genre", "fantasy"]).unwrap();
        assert_eq!(args.words.as_deref(), Some("cat, moon"));
        assert_eq!(args.genre.as_deref(), Some("fantasy"));
    }

    #[test]
    fn test_words_and_genre_are_optional() {
        let args = CliArgs::try_parse_from(["storyweaver"]).unwrap();
        assert!(args.words.is_none());
        assert!(args.genre.is_none());
    }
}
