#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use katarenga::{
    cli::{
        describe_outcome, parse_command, parse_layout, render_board, ChannelObserver, Command,
        UiEvent, HELP,
    },
    init_logging,
    transport::{lock_session, shared, spawn_session_pump, wait_connected, Link, SharedSession},
    Board, GameSession, GameVariant, LinkConfig, Player, RandomAi, Role, SessionConfig,
    DEFAULT_HOST, DEFAULT_PORT, MAX_FRAME_LEN,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum GameArg {
    Katarenga,
    Congress,
    Isolation,
}

#[cfg(feature = "std")]
impl From<GameArg> for GameVariant {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Katarenga => GameVariant::Katarenga,
            GameArg::Congress => GameVariant::Congress,
            GameArg::Isolation => GameVariant::Isolation,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play on this machine, both seats at the keyboard or against the AI.
    Local {
        #[arg(long, value_enum, default_value_t = GameArg::Katarenga)]
        game: GameArg,
        #[arg(long, help = "Let the AI play as player 2")]
        ai: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = "1,2,3,4", help = "Board squares, e.g. 1,2r,3f,4l")]
        squares: String,
    },
    /// Host a networked game as player 1 and wait for a peer.
    Host {
        #[arg(long, value_enum, default_value_t = GameArg::Katarenga)]
        game: GameArg,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value = "1,2,3,4", help = "Board squares, e.g. 1,2r,3f,4l")]
        squares: String,
        #[arg(long, help = "Validate moves received from the peer")]
        verify_moves: bool,
        #[arg(
            long,
            default_value_t = MAX_FRAME_LEN,
            help = "Longest frame accepted from the peer, in bytes"
        )]
        max_frame_len: usize,
    },
    /// Join a hosted game as player 2.
    Join {
        #[arg(long, default_value = DEFAULT_HOST)]
        address: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(long, value_enum, default_value_t = PlayerType::Human)]
        player: PlayerType,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Validate moves received from the peer")]
        verify_moves: bool,
        #[arg(
            long,
            default_value_t = MAX_FRAME_LEN,
            help = "Longest frame accepted from the peer, in bytes"
        )]
        max_frame_len: usize,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn starting_board(variant: GameVariant, squares: &str) -> anyhow::Result<Board> {
    let layout = parse_layout(squares)
        .ok_or_else(|| anyhow::anyhow!("Invalid --squares value '{}'", squares))?;
    Ok(variant.setup(&layout)?)
}

/// Who moves for each seat on this instance.
#[cfg(feature = "std")]
struct Seats {
    ai: [bool; 2],
}

#[cfg(feature = "std")]
impl Seats {
    fn is_ai(&self, player: Player) -> bool {
        self.ai[usize::from(player.number() - 1)]
    }

    fn any_human(&self) -> bool {
        self.ai.iter().any(|ai| !ai)
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { game, ai, seed, squares } => {
            let variant = GameVariant::from(game);
            let board = starting_board(variant, &squares)?;
            let rng = make_rng(seed);
            println!("Starting local {} game...", variant);
            let (observer, ui) = ChannelObserver::new();
            let mut session = GameSession::local(variant);
            session.set_observer(Box::new(observer));
            let session = shared(session);
            {
                let mut s = lock_session(&session);
                s.set_board(board);
                s.start_game()?;
            }
            let seats = Seats { ai: [false, ai] };
            play(session, ui, None, seats, rng).await?;
        }
        Commands::Host {
            game,
            port,
            player,
            seed,
            squares,
            verify_moves,
            max_frame_len,
        } => {
            let variant = GameVariant::from(game);
            let board = starting_board(variant, &squares)?;
            let rng = make_rng(seed);
            let (link, mut events) = Link::with_config(LinkConfig { max_frame_len });
            let addr = link.start_as_host(port).await?;
            println!(
                "Hosting {} on port {}. Waiting for a player to connect...",
                variant,
                addr.port()
            );
            wait_connected(&mut events).await?;
            println!("Player connected!");

            let config = SessionConfig { verify_inbound_moves: verify_moves };
            let (observer, ui) = ChannelObserver::new();
            let mut session = GameSession::new(variant, Role::Host, Box::new(link.clone()), config);
            session.set_observer(Box::new(observer));
            let session = shared(session);
            spawn_session_pump(session.clone(), events);
            {
                let mut s = lock_session(&session);
                s.set_board(board);
                s.start_game()?;
            }
            let ai = player == PlayerType::Ai;
            play(session, ui, Some(link), Seats { ai: [ai, ai] }, rng).await?;
        }
        Commands::Join {
            address,
            port,
            player,
            seed,
            verify_moves,
            max_frame_len,
        } => {
            let rng = make_rng(seed);
            println!("Connecting to {}:{}...", address, port);
            let (link, mut events) = Link::with_config(LinkConfig { max_frame_len });
            link.connect_to(&address, port).await?;
            wait_connected(&mut events).await?;
            println!("Connected successfully! Waiting for the host to start...");

            let config = SessionConfig { verify_inbound_moves: verify_moves };
            let (observer, ui) = ChannelObserver::new();
            // The variant is replaced by the one announced in BOARD_DATA.
            let mut session = GameSession::new(
                GameVariant::Katarenga,
                Role::Guest,
                Box::new(link.clone()),
                config,
            );
            session.set_observer(Box::new(observer));
            let session = shared(session);
            spawn_session_pump(session.clone(), events);
            let ai = player == PlayerType::Ai;
            play(session, ui, Some(link), Seats { ai: [ai, ai] }, rng).await?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn ai_turn(session: &SharedSession, ai: &mut RandomAi, rng: &mut SmallRng) {
    let mut s = lock_session(session);
    let status = s.status();
    if !status.is_local_turn() {
        return;
    }
    let Some(board) = s.board() else {
        return;
    };
    match ai.choose_move(rng, board, s.variant(), status.current_player) {
        Some(mv) => {
            println!("AI ({}) plays {}", status.current_player, mv);
            if let Err(e) = s.make_move(mv) {
                log::warn!("AI move {} rejected: {}", mv, e);
            }
        }
        None => println!("{} has no valid move.", status.current_player),
    }
}

#[cfg(feature = "std")]
fn run_command(session: &SharedSession, seats: &Seats, command: Command) -> bool {
    let mut s = lock_session(session);
    match command {
        Command::Play(_) if seats.is_ai(s.current_player()) => {
            println!("Wait for the AI to move.");
        }
        Command::Play(mv) => {
            if let Err(e) = s.make_move(mv) {
                println!("{}", e);
            }
        }
        Command::Chat(text) => {
            if !s.send_chat(&text) {
                println!("Chat is only available in network games.");
            }
        }
        Command::Moves => {
            let moves = s.valid_moves();
            if moves.is_empty() {
                println!("No valid moves right now.");
            }
            for mv in moves {
                println!("  {}", mv);
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

#[cfg(feature = "std")]
async fn play(
    session: SharedSession,
    mut ui: UnboundedReceiver<UiEvent>,
    link: Option<Link>,
    seats: Seats,
    mut rng: SmallRng,
) -> anyhow::Result<()> {
    let me = lock_session(&session).role().local_player();
    let mut ai = RandomAi::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let stdin_open = seats.any_human();
    if stdin_open {
        println!("{}", HELP);
    }

    loop {
        tokio::select! {
            event = ui.recv() => match event {
                Some(UiEvent::Board(board)) => println!("\n{}", render_board(&board)),
                Some(UiEvent::Turn(player)) => {
                    let local = lock_session(&session).status().is_local_turn();
                    if local && seats.is_ai(player) {
                        ai_turn(&session, &mut ai, &mut rng);
                    } else if local {
                        println!("{} to move.", player);
                    } else {
                        println!("Waiting for {}...", player);
                    }
                }
                Some(UiEvent::Ended(outcome)) => {
                    println!("\nGAME OVER: {}", describe_outcome(outcome, me));
                    break;
                }
                Some(UiEvent::Chat(message)) => println!("[chat] {}", message),
                None => break,
            },
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match parse_command(&line) {
                    Some(command) => {
                        if !run_command(&session, &seats, command) {
                            break;
                        }
                    }
                    None => println!("Unrecognised input. Type 'help' for commands."),
                },
                None => break,
            },
        }
    }

    if let Some(link) = link {
        // Let the final MOVE and GAME_END frames reach the peer.
        link.close().await;
    }
    Ok(())
}
