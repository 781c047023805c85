use anagramer_client::chat::{self, ChatSession, SocketTransport};
use anagramer_client::config::{DefinitionSourceKind, WordSourceKind};
use anagramer_client::{
    ApiClient, Config, DefinitionCache, DefinitionSource, DictClient, GameController,
    LocalWordSource, RemoteWordSource, WordSource,
};
use anagramer_core::{ChatState, Dictionary, GameSession, NumbersGame};
use anagramer_types::{ChatMessage, GamePhase, GameSnapshot};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

const HELP: &str = "\
Commands:
  <word>            guess a word
  :new              start a new round
  :hint             reveal a letter
  :shuffle          shuffle the letters
  :back             bring back the last guess
  :finish           finish the round
  :score            show the score breakdown
  :define <word>    look up a word
  :scores           show the high score table
  :submit <name>    post the last final score
  :chat <text>      send a chat message
  :number high|low  pick a numbers game tile
  :target           draw the numbers game target
  :reset-numbers    clear the numbers game
  :quit             leave";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    info!("Starting Anagramer...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let api = match ApiClient::new(&config.api_base_url) {
        Ok(api) => api,
        Err(e) => {
            error!("Bad backend URL '{}': {}", config.api_base_url, e);
            std::process::exit(1);
        }
    };

    let words: Arc<dyn WordSource> = match config.word_source {
        WordSourceKind::Local => match Dictionary::from_file(&config.dictionary_path) {
            Ok(dictionary) => Arc::new(LocalWordSource::new(
                Arc::new(dictionary),
                config.seed_length,
                config.minimum_word_size,
            )),
            Err(e) => {
                error!("{:#}", e);
                error!(
                    "Set DICTIONARY_PATH to a newline-separated word list, or WORD_SOURCE=remote."
                );
                std::process::exit(1);
            }
        },
        WordSourceKind::Remote => Arc::new(RemoteWordSource::new(
            api.clone(),
            config.seed_length,
            config.minimum_word_size,
        )),
    };

    let definition_source: Arc<dyn DefinitionSource> = match config.definition_source {
        DefinitionSourceKind::Http => Arc::new(api.clone()),
        DefinitionSourceKind::Dict => Arc::new(DictClient::new(config.dict_server.clone())),
    };
    let definitions = DefinitionCache::new(definition_source, config.definition_timeout);

    let session = GameSession::new().with_rules(config.round_rules());
    let game = Arc::new(GameController::new(session, words, definitions));
    tokio::spawn(print_game(game.subscribe()));

    let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
    let transport = Arc::new(SocketTransport::new(api.clone(), outgoing_tx));
    let mut chat_session = ChatSession::new(transport, config.typing_timeout);
    tokio::spawn(print_chat(chat_session.subscribe()));

    let inbox = chat_session.inbox();
    let chat_url = config.chat_url.clone();
    tokio::spawn(async move {
        if let Err(e) = chat::connection::run(&chat_url, inbox, outgoing_rx).await {
            warn!("Chat unavailable: {}", e);
        }
    });

    println!("{}", HELP);
    if let Err(e) = game.new_round().await {
        warn!("First round failed to load: {}", e);
    }

    let mut numbers = NumbersGame::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };

        let line = line.trim();
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            ":quit" => break,
            ":help" => println!("{}", HELP),
            ":new" => {
                if game.new_round().await.is_ok() && game.snapshot().got_new_hint {
                    println!("You earned a hint! ({} available)", game.snapshot().hint_count);
                    game.acknowledge_new_hint().await;
                }
            }
            ":hint" => match game.use_hint().await {
                Some(letter) => println!("Hint: {}", letter),
                None => println!("No hint available"),
            },
            ":shuffle" => game.shuffle().await,
            ":back" => {
                game.bring_back_word().await;
                println!("> {}", game.snapshot().guess_buffer);
            }
            ":finish" => {
                if let Ok(score) = game.finish().await {
                    println!("Final score: {}", score);
                }
            }
            ":score" => {
                let snapshot = game.snapshot();
                for entry in &snapshot.score_breakdown {
                    println!(
                        "{} letters: {} words, {} points",
                        entry.length, entry.words, entry.points
                    );
                }
                println!("Total: {}", snapshot.score);
            }
            ":define" => match game.define(argument).await {
                Ok(definition) => println!("{}\n{}", definition.word, definition.text),
                Err(e) => println!("{}", e.user_message()),
            },
            ":scores" => match api.high_scores().await {
                Ok(scores) => {
                    for entry in scores.list {
                        println!("{:>6}  {}", entry.score, entry.name);
                    }
                }
                Err(e) => println!("{}", e.user_message()),
            },
            ":submit" => match game.snapshot().final_score {
                Some(score) if !argument.is_empty() => {
                    let score = i32::try_from(score).unwrap_or(i32::MAX);
                    match api.post_high_score(argument, score).await {
                        Ok(scores) => println!("{} high scores on the board", scores.list.len()),
                        Err(e) => println!("{}", e.user_message()),
                    }
                }
                Some(_) => println!("Usage: :submit <name>"),
                None => println!("Finish a round first"),
            },
            ":chat" => {
                chat_session.update_draft(argument);
                if let Err(e) = chat_session.send_draft().await {
                    println!("{}", e.user_message());
                }
            }
            ":number" => match numbers.choices().iter().position(|&n| n == 0) {
                Some(index) => {
                    numbers.choose_number(index, argument == "high");
                    println!("Numbers: {:?}", numbers.choices());
                }
                None => println!("All six numbers are chosen"),
            },
            ":target" => {
                if numbers.randomize() {
                    println!("Target: {}  Numbers: {:?}", numbers.target(), numbers.choices());
                } else {
                    println!("Choose all six numbers first");
                }
            }
            ":reset-numbers" => numbers.reset(),
            _ if command.starts_with(':') => println!("Unknown command, try :help"),
            _ => {
                if !game.update_guess(line).await {
                    println!("Use only the letters shown");
                    continue;
                }
                if let Ok(outcome) = game.submit_buffer().await {
                    println!("{}", outcome.message());
                }
            }
        }
    }

    info!("Goodbye");
}

async fn print_game(mut snapshots: watch::Receiver<GameSnapshot>) {
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();

        if let Some(error) = &snapshot.error {
            println!("! {}", error);
            continue;
        }
        if snapshot.loading {
            println!("Loading...");
            continue;
        }

        match snapshot.phase {
            GamePhase::NotStarted => {}
            GamePhase::InProgress => println!(
                "[{}]  {} found  score {}  hints {}  revealed {:?}",
                snapshot.main_letters,
                snapshot.progress(),
                snapshot.score,
                snapshot.hint_count,
                snapshot.revealed_letters,
            ),
            GamePhase::Finished => {
                println!("Round over: {}", snapshot.valid_words.join(", "));
                if let Some(score) = snapshot.final_score {
                    println!("Final score: {}", score);
                }
            }
        }
    }
}

async fn print_chat(mut states: watch::Receiver<ChatState>) {
    let mut printed = 0;
    let mut last_typing = None;

    while states.changed().await.is_ok() {
        let state = states.borrow_and_update().clone();

        for message in state.log.iter().skip(printed) {
            let sender = &message.user().name;
            match message {
                ChatMessage::Text(text) => {
                    println!("[{}] {}: {}", text.timestamp, sender, text.body)
                }
                ChatMessage::UserList(list) => {
                    let names: Vec<&str> = list.users.iter().map(|u| u.name.as_str()).collect();
                    println!("Online: {}", names.join(", "));
                }
                _ => {}
            }
        }
        printed = state.log.len();

        let typing = state.typing_line();
        if typing != last_typing {
            if let Some(line) = &typing {
                println!("{}", line);
            }
            last_typing = typing;
        }
    }
}
