use clap::Parser;
use log::info;
use rs_word_scramble::*;
use std::error::Error;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

/// Find as many words as you can using the letters of the puzzle word.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a file that contains candidate puzzle words, with one word on each line.
    #[arg(short = 'f', long, default_value = "start.txt")]
    words_file: PathBuf,

    /// Path to a file that contains every word that counts as a real word, one per line.
    #[arg(short = 'd', long, default_value = "/usr/share/dict/words")]
    dictionary_file: PathBuf,

    /// Directory where the game is saved between runs.
    #[arg(short = 's', long, default_value = ".word-scramble")]
    save_dir: PathBuf,

    /// Start a new game instead of resuming the saved one.
    #[arg(long)]
    new_game: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::try_init().unwrap_or(());
    let args = Args::parse();

    let word_list = WordList::load_or_default(&args.words_file);
    info!("There are {} possible puzzle words.", word_list.len());

    let dictionary = WordListDictionary::load_or_default(&args.dictionary_file);
    info!("The dictionary knows {} words.", dictionary.len());

    let store = WriteQueue::new(FileStore::open(&args.save_dir)?)?;
    let mut game = GameState::new(store);
    if args.new_game {
        game.reset_resume_flag(false);
    }
    game.start(&word_list);

    play_interactive_game(&mut game, &word_list, &dictionary)?;

    game.gateway().flush()?;
    Ok(())
}

fn play_interactive_game<G: PersistenceGateway>(
    game: &mut GameState<G>,
    word_list: &WordList,
    dictionary: &WordListDictionary,
) -> io::Result<()> {
    println!(
        "Find words using the letters of the puzzle word.\n\n\
         Enter a word to submit it, or one of:\n\n\
           * ':words' to list the words you've found\n\
           * ':restart' to start a new game\n\
           * ':quit' to stop playing (your game is saved)"
    );
    print_puzzle(game);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        match line.trim() {
            "" => continue,
            ":quit" => return Ok(()),
            ":words" => print_used_words(game.used_words()),
            ":restart" => {
                game.restart(word_list);
                print_puzzle(game);
            }
            answer => {
                let outcome = game.submit(answer, dictionary);
                match (outcome.title(), outcome.message(game.puzzle_word())) {
                    (Some(title), Some(message)) => println!("{title}: {message}"),
                    _ => println!(
                        "Nice! You've found {} word(s).",
                        game.used_words().len()
                    ),
                }
            }
        }
    }
}

fn print_puzzle<G: PersistenceGateway>(game: &GameState<G>) {
    println!("\nPuzzle word: {}", game.puzzle_word());
    if !game.used_words().is_empty() {
        print_used_words(game.used_words());
    }
}

fn print_used_words(used_words: &[String]) {
    if used_words.is_empty() {
        println!("No words found yet.");
        return;
    }
    for word in used_words {
        println!("\t{}", word);
    }
}
