//! Subcommands and their conversion into core commands.
//!
//! Multi-word values (names, addresses, cuisines, keywords) are taken as
//! several tokens and joined with single spaces, so the same syntax works
//! in one-shot mode and in the shell.

use anyhow::Context;
use clap::{ArgGroup, Subcommand};
use foodiary_core::command::{
    AddCommand, ClearCommand, DeleteCommand, EditCommand, EditRestaurantDescriptor, FindCommand,
    HistoryCommand, ListCommand, RateCommand, RedoCommand, SelectCommand, TagCommand, UndoCommand,
    VisitWebCommand, VisitWebTarget,
};
use foodiary_core::{
    Address, Command, Cuisine, Email, Index, Name, Phone, Rating, RestaurantBuilder, Tag, Weblink,
};

/// Food diary operations.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a restaurant
    Add {
        #[arg(short, long, num_args = 1.., required = true)]
        name: Vec<String>,
        #[arg(short, long)]
        phone: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, num_args = 1.., required = true)]
        address: Vec<String>,
        #[arg(short, long = "tag", num_args = 1..)]
        tags: Vec<String>,
        #[arg(short, long, num_args = 1..)]
        cuisine: Option<Vec<String>>,
        #[arg(short, long)]
        rating: Option<String>,
        #[arg(short, long)]
        weblink: Option<String>,
    },

    /// Edit the restaurant at INDEX; a bare optional flag clears that field
    Edit {
        index: Index,
        #[arg(short, long, num_args = 1..)]
        name: Option<Vec<String>>,
        #[arg(short, long)]
        phone: Option<Phone>,
        #[arg(short, long)]
        email: Option<Email>,
        #[arg(short, long, num_args = 1..)]
        address: Option<Vec<String>>,
        #[arg(short, long = "tag", num_args = 0..)]
        tags: Option<Vec<Tag>>,
        #[arg(short, long, num_args = 0..)]
        cuisine: Option<Vec<String>>,
        #[arg(short, long, num_args = 0..=1)]
        rating: Option<Option<Rating>>,
        #[arg(short, long, num_args = 0..=1)]
        weblink: Option<Option<Weblink>>,
    },

    /// Delete the restaurant at INDEX
    Delete { index: Index },

    /// Select the restaurant at INDEX
    Select { index: Index },

    /// Show restaurants whose name contains any keyword, or rated at least --min-rating
    #[command(group(ArgGroup::new("criteria").required(true).args(["keywords", "min_rating"])))]
    Find {
        keywords: Vec<String>,
        #[arg(long = "min-rating")]
        min_rating: Option<Rating>,
    },

    /// Show restaurants carrying any of the tags
    Filter {
        #[arg(required = true)]
        tags: Vec<Tag>,
    },

    /// Show every restaurant
    List,

    /// Remove every restaurant
    Clear,

    /// Rate the restaurant at INDEX from 0 to 5
    Rate { index: Index, rating: Rating },

    /// Add tags to the restaurant at INDEX
    Tag {
        index: Index,
        #[arg(required = true)]
        tags: Vec<Tag>,
    },

    /// Show the website of the restaurant at INDEX, or open WEBLINK
    #[command(name = "visitWeb")]
    VisitWeb { target: String },

    /// Undo the last change
    Undo,

    /// Redo the last undone change
    Redo,

    /// List commands entered in this shell session
    History,

    /// Start an interactive shell
    Shell,
}

/// What the binary should do for one parsed subcommand.
#[derive(Debug)]
pub enum Invocation {
    Run(Box<dyn Command>),
    Shell,
}

impl Commands {
    /// Validates raw values and builds the matching core command.
    pub fn into_invocation(self) -> anyhow::Result<Invocation> {
        let command: Box<dyn Command> = match self {
            Commands::Add {
                name,
                phone,
                email,
                address,
                tags,
                cuisine,
                rating,
                weblink,
            } => {
                let restaurant = RestaurantBuilder::new(words(name), phone, email, words(address))
                    .tags(tags)
                    .cuisine(cuisine.map(words))
                    .rating(rating)
                    .weblink(weblink)
                    .build()?;
                Box::new(AddCommand::new(restaurant))
            }
            Commands::Edit {
                index,
                name,
                phone,
                email,
                address,
                tags,
                cuisine,
                rating,
                weblink,
            } => {
                let descriptor = EditRestaurantDescriptor {
                    name: name.map(|parts| Name::parse(words(parts))).transpose()?,
                    phone,
                    email,
                    address: address
                        .map(|parts| Address::parse(words(parts)))
                        .transpose()?,
                    tags: tags.map(|tags| tags.into_iter().collect()),
                    cuisine: cuisine.map(clearable_cuisine).transpose()?,
                    rating,
                    weblink,
                };
                Box::new(EditCommand::new(index, descriptor))
            }
            Commands::Delete { index } => Box::new(DeleteCommand::new(index)),
            Commands::Select { index } => Box::new(SelectCommand::new(index)),
            Commands::Find {
                keywords,
                min_rating,
            } => match min_rating {
                Some(rating) => Box::new(FindCommand::by_min_rating(rating)),
                None => Box::new(FindCommand::by_name_keywords(keywords)),
            },
            Commands::Filter { tags } => Box::new(FindCommand::by_tags(tags.into_iter().collect())),
            Commands::List => Box::new(ListCommand),
            Commands::Clear => Box::new(ClearCommand),
            Commands::Rate { index, rating } => Box::new(RateCommand::new(index, rating)),
            Commands::Tag { index, tags } => {
                Box::new(TagCommand::new(index, tags.into_iter().collect()))
            }
            Commands::VisitWeb { target } => Box::new(VisitWebCommand::new(parse_target(&target)?)),
            Commands::Undo => Box::new(UndoCommand),
            Commands::Redo => Box::new(RedoCommand),
            Commands::History => Box::new(HistoryCommand),
            Commands::Shell => return Ok(Invocation::Shell),
        };
        Ok(Invocation::Run(command))
    }
}

fn words(parts: Vec<String>) -> String {
    parts.join(" ")
}

/// No tokens clears the cuisine.
fn clearable_cuisine(parts: Vec<String>) -> anyhow::Result<Option<Cuisine>> {
    if parts.is_empty() {
        return Ok(None);
    }
    Ok(Some(Cuisine::parse(words(parts))?))
}

/// Numeric targets are indices; anything else must be a weblink.
fn parse_target(raw: &str) -> anyhow::Result<VisitWebTarget> {
    let trimmed = raw.trim();
    let numeric = !trimmed.is_empty()
        && trimmed
            .trim_start_matches(['-', '+'])
            .chars()
            .all(|c| c.is_ascii_digit());
    if numeric {
        let index = trimmed
            .parse::<Index>()
            .with_context(|| format!("invalid visitWeb index `{trimmed}`"))?;
        return Ok(VisitWebTarget::Index(index));
    }
    Ok(VisitWebTarget::Weblink(Weblink::parse(trimmed)?))
}
