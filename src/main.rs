// ============================================================================
// LazyForex - Dashboard économique dans le terminal
// ============================================================================
// Programme TUI : taux de change, métriques de paires, inflation US et
// comparaison de coût de vie
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Async dans sync : tokio::runtime::Runtime pour appels API
// 4. Trait objects : les providers sont passés au worker, pas de global
// ============================================================================

use std::io;
use std::sync::{mpsc, Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Datelike;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazyforex::api::Providers;
use lazyforex::app::{App, InputContext};
use lazyforex::models::{CpiSeries, CurrencyCode, Lookback, PairItem, PriceSeries};
use lazyforex::ui::{events::EventHandler, render};

/// Devises cibles chargées au démarrage (comme l'outil d'origine)
const DEFAULT_TARGETS: [CurrencyCode; 3] = [
    CurrencyCode::Eur,
    CurrencyCode::Gbp,
    CurrencyCode::Jpy,
];

/// Profondeur d'historique CPI en années
const CPI_YEARS_BACK: i32 = 3;

// ============================================================================
// AppCommand : Commandes pour le worker thread
// ============================================================================
// CONCEPT RUST : Command pattern avec channels
// - L'event loop envoie des commandes au worker thread
// - Le worker thread exécute les tâches async (fetch API)
// - Communication via mpsc channels (multi-producer, single-consumer)
// ============================================================================

/// Commandes envoyées au worker thread pour exécuter des tâches async
#[derive(Debug, Clone)]
enum AppCommand {
    /// Recharger la série d'une paire avec un nouveau lookback
    ReloadPairSeries {
        quote: CurrencyCode,
        lookback: Lookback,
        index: usize,
    },

    /// Ajouter une devise à la watchlist (taux + série fetchés en fond)
    AddCurrency { quote: CurrencyCode },

    /// Rafraîchir les taux spot de toute la watchlist
    RefreshRates,

    /// Recharger toute la watchlist avec une nouvelle devise de base
    ChangeBase { base: CurrencyCode },

    /// Charger la série CPI du BLS
    LoadInflation,
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Série d'une paire rechargée avec succès
    PairSeriesLoaded { index: usize, series: PriceSeries },

    /// Nouvelle devise ajoutée (données éventuellement partielles)
    CurrencyAdded { item: PairItem },

    /// Taux spot rafraîchis (None = fetch en échec, taux précédent gardé)
    RatesRefreshed {
        rates: Vec<(CurrencyCode, Option<f64>)>,
    },

    /// Watchlist entièrement rechargée pour une nouvelle base
    BaseChanged {
        base: CurrencyCode,
        watchlist: Vec<PairItem>,
    },

    /// Série CPI chargée
    InflationLoaded { series: CpiSeries },

    /// Erreur lors d'un chargement
    LoadError { what: String, error: String },

    /// Erreur lors de l'ajout d'une devise
    AddError { code: String, error: String },
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place
// - Rotation quotidienne automatique des logs
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// Les logs sont écrits dans :
/// - Linux/WSL : ~/.local/share/lazyforex/logs/lazyforex.log
/// - macOS : ~/Library/Application Support/lazyforex/logs/lazyforex.log
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazyforex/logs/lazyforex.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=debug cargo run
/// RUST_LOG=lazyforex=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Répertoire de données de la plateforme, sinon ./logs
    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("lazyforex").join("logs"))
        .unwrap_or_else(|| std::path::PathBuf::from("./logs"));

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Rotation quotidienne : lazyforex.log.2024-01-15
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazyforex.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: lazyforex::api::yahoo)
                .with_thread_ids(true) // Inclut l'ID du thread (utile pour async)
                .with_line_number(true), // Inclut le numéro de ligne
        )
        .with(
            // Filtre les logs par niveau
            // - RUST_LOG=debug : tous les logs debug+
            // - Par défaut : debug pour lazyforex, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyforex=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================
// CONCEPT RUST : Async dans sync
// - main() est synchrone (pour TUI)
// - Mais on a besoin d'async pour les appels API
// - Solution : tokio::runtime::Runtime pour exécuter du code async
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging FIRST
    // - Si init échoue, on affiche l'erreur et continue quand même
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    println!("LazyForex starting up");
    info!("LazyForex starting up");

    // Construit les providers une seule fois : ils seront passés
    // explicitement au chargement initial puis au worker
    let providers = Providers::production()?;

    // Charge les données initiales (appels API async)
    info!("Loading initial dashboard data");
    println!("📊 Chargement des données...\n");

    let runtime = tokio::runtime::Runtime::new()?;
    let (watchlist, cpi) = runtime.block_on(load_initial_data(&providers));

    info!("Initial data loaded");
    println!("✅ Données chargées !\n");

    // Setup du terminal en mode TUI
    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // Crée l'état de l'application avec les données chargées
    // CONCEPT RUST : Arc<Mutex<>> pour partage entre threads
    // - Arc : Reference counting pour ownership partagé
    // - Mutex : Protection contre les data races
    let mut initial_app = App::with_watchlist(CurrencyCode::Usd, watchlist);
    initial_app.cpi = cpi;
    let app = Arc::new(Mutex::new(initial_app));

    // Crée les channels pour communication avec le worker
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    // Lance le worker thread en arrière-plan avec les providers
    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx, app.clone(), providers);

    // Crée le gestionnaire d'événements
    let events = EventHandler::new();

    // Exécute l'event loop
    info!("Starting event loop");
    let result = run(&mut terminal, app.clone(), &events, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Chargement initial des données
// ============================================================================

/// Charge les taux, séries et la série CPI au démarrage
///
/// CONCEPT : Best effort par devise
/// - Un fetch en échec est loggé et laisse l'item sans données
/// - Le dashboard démarre toujours, même dégradé
async fn load_initial_data(providers: &Providers) -> (Vec<PairItem>, Option<CpiSeries>) {
    let base = CurrencyCode::Usd;
    let lookback = Lookback::default();
    let mut watchlist = Vec::new();

    for (i, &quote) in DEFAULT_TARGETS.iter().enumerate() {
        debug!(currency = %quote.code(), progress = i + 1, total = DEFAULT_TARGETS.len(), "Fetching currency data");
        println!(
            "  [{}/{}] Chargement de {}/{}...",
            i + 1,
            DEFAULT_TARGETS.len(),
            base.code(),
            quote.code()
        );

        let item = load_pair_item(providers, base, quote, lookback).await;
        if item.spot_rate.is_some() || item.has_series() {
            println!("    ✓ OK");
        }
        watchlist.push(item);

        // Petit délai entre les requêtes (rate limiting)
        if i < DEFAULT_TARGETS.len() - 1 {
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
        }
    }

    // Série CPI : mêmes semantics best effort
    println!("  Chargement de l'inflation US...");
    let cpi = match fetch_cpi(providers).await {
        Ok(series) => {
            info!(observations = series.len(), "CPI series fetched successfully");
            println!("    ✓ OK");
            Some(series)
        }
        Err(e) => {
            error!(error = ?e, "Failed to fetch CPI series");
            None
        }
    };

    (watchlist, cpi)
}

/// Charge le taux spot et la série d'une devise cible
///
/// Chaque échec laisse le champ correspondant à None : une devise
/// en erreur est simplement affichée sans données, sans retry
async fn load_pair_item(
    providers: &Providers,
    base: CurrencyCode,
    quote: CurrencyCode,
    lookback: Lookback,
) -> PairItem {
    let mut item = PairItem::new(quote);

    match providers.rates.get_rate(base, quote).await {
        Ok(rate) => {
            info!(pair = %format!("{}/{}", base.code(), quote.code()), rate, "Spot rate fetched");
            item.spot_rate = Some(rate);
        }
        Err(e) => {
            error!(currency = %quote.code(), error = ?e, "Failed to fetch spot rate");
        }
    }

    match providers.series.get_series(base, quote, lookback).await {
        Ok(series) => {
            info!(pair = %series.pair.display(), points = series.len(), "Price series fetched");
            item.series = Some(series);
        }
        Err(e) => {
            error!(currency = %quote.code(), error = ?e, "Failed to fetch price series");
        }
    }

    item
}

/// Récupère la série CPI sur la fenêtre d'années courante
async fn fetch_cpi(providers: &Providers) -> Result<CpiSeries> {
    let end_year = chrono::Utc::now().year();
    let start_year = end_year - CPI_YEARS_BACK;
    providers.inflation.get_cpi_series(start_year, end_year).await
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// CONCEPT RUST : Background async worker avec channels
// - Thread séparé qui traite les commandes async
// - Reçoit des AppCommand via un channel (command_rx)
// - Envoie des AppResult via un autre channel (result_tx)
// - Permet de faire des appels API sans bloquer l'UI
// ============================================================================

/// Worker thread qui exécute les tâches async en arrière-plan
///
/// CONCEPT RUST : Thread + async runtime
/// - std::thread::spawn() : crée un thread OS
/// - tokio::runtime::Runtime : runtime async dans ce thread
/// - Les providers sont déplacés dans le thread (ownership)
fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
    providers: Providers,
) {
    std::thread::spawn(move || {
        // Runtime tokio propre à ce thread
        let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

        // Boucle de traitement des commandes
        // - Attend une commande sur command_rx
        // - Traite la commande de manière async
        // - Envoie le résultat sur result_tx
        loop {
            match command_rx.recv() {
                Ok(command) => {
                    info!(?command, "Worker received command");
                    process_command(command, &runtime, &result_tx, &app, &providers);
                }
                Err(_) => {
                    // Channel fermé, on quitte
                    info!("Worker thread exiting (channel closed)");
                    break;
                }
            }
        }
    });
}

/// Traite une commande du worker
///
/// CONCEPT : block_on dans un worker thread
/// - block_on() bloque le thread worker (pas l'UI)
/// - L'UI continue à tourner normalement
fn process_command(
    command: AppCommand,
    runtime: &tokio::runtime::Runtime,
    result_tx: &mpsc::Sender<AppResult>,
    app: &Arc<Mutex<App>>,
    providers: &Providers,
) {
    match command {
        AppCommand::ReloadPairSeries { quote, lookback, index } => {
            let base = with_loading(app, format!(
                "Chargement {} ({})...",
                quote.code(),
                lookback.label()
            ));

            let result = runtime
                .block_on(async { providers.series.get_series(base, quote, lookback).await });

            match result {
                Ok(series) => {
                    info!(pair = %series.pair.display(), points = series.len(), "Series reloaded");
                    let _ = result_tx.send(AppResult::PairSeriesLoaded { index, series });
                }
                Err(e) => {
                    error!(currency = %quote.code(), error = ?e, "Failed to reload series");
                    let _ = result_tx.send(AppResult::LoadError {
                        what: format!("série {}", quote.code()),
                        error: e.to_string(),
                    });
                }
            }

            stop_loading(app);
        }

        AppCommand::AddCurrency { quote } => {
            let base = with_loading(app, format!("Ajout de {}...", quote.code()));
            let lookback = current_lookback(app);

            let item =
                runtime.block_on(load_pair_item(providers, base, quote, lookback));

            // L'ajout échoue seulement si ni le taux ni la série
            // n'ont pu être chargés
            if item.spot_rate.is_none() && !item.has_series() {
                let _ = result_tx.send(AppResult::AddError {
                    code: quote.code().to_string(),
                    error: "aucune donnée disponible".to_string(),
                });
            } else {
                info!(currency = %quote.code(), "Currency added");
                let _ = result_tx.send(AppResult::CurrencyAdded { item });
            }

            stop_loading(app);
        }

        AppCommand::RefreshRates => {
            let base = with_loading(app, "Rafraîchissement des taux...".to_string());
            let quotes = watched_quotes(app);

            let rates = runtime.block_on(async {
                let mut rates = Vec::new();
                for (i, &quote) in quotes.iter().enumerate() {
                    let rate = match providers.rates.get_rate(base, quote).await {
                        Ok(rate) => Some(rate),
                        Err(e) => {
                            error!(currency = %quote.code(), error = ?e, "Failed to refresh rate");
                            None
                        }
                    };
                    rates.push((quote, rate));

                    if i < quotes.len() - 1 {
                        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
                    }
                }
                rates
            });

            let _ = result_tx.send(AppResult::RatesRefreshed { rates });
            stop_loading(app);
        }

        AppCommand::ChangeBase { base } => {
            {
                let mut app_lock = app.lock().unwrap();
                app_lock.start_loading(Some(format!("Nouvelle base {}...", base.code())));
            }
            let quotes = watched_quotes(app);
            let lookback = current_lookback(app);

            let watchlist = runtime.block_on(async {
                let mut watchlist = Vec::new();
                for (i, &quote) in quotes.iter().enumerate() {
                    watchlist.push(load_pair_item(providers, base, quote, lookback).await);

                    if i < quotes.len() - 1 {
                        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
                    }
                }
                watchlist
            });

            info!(base = %base.code(), currencies = watchlist.len(), "Watchlist reloaded for new base");
            let _ = result_tx.send(AppResult::BaseChanged { base, watchlist });
            stop_loading(app);
        }

        AppCommand::LoadInflation => {
            with_loading(app, "Chargement de l'inflation US...".to_string());

            let result = runtime.block_on(fetch_cpi(providers));

            match result {
                Ok(series) => {
                    info!(observations = series.len(), "CPI series loaded");
                    let _ = result_tx.send(AppResult::InflationLoaded { series });
                }
                Err(e) => {
                    error!(error = ?e, "Failed to load CPI series");
                    let _ = result_tx.send(AppResult::LoadError {
                        what: "inflation US".to_string(),
                        error: e.to_string(),
                    });
                }
            }

            stop_loading(app);
        }
    }
}

/// Active l'indicateur de chargement et retourne la base courante
///
/// CONCEPT : Lock scope minimisé
/// - Lock seulement le temps de lire/écrire l'état
/// - Jamais de lock pendant un appel réseau
fn with_loading(app: &Arc<Mutex<App>>, message: String) -> CurrencyCode {
    let mut app_lock = app.lock().unwrap();
    app_lock.start_loading(Some(message));
    app_lock.base
}

/// Désactive l'indicateur de chargement
fn stop_loading(app: &Arc<Mutex<App>>) {
    let mut app_lock = app.lock().unwrap();
    app_lock.stop_loading();
}

/// Retourne les devises actuellement suivies
fn watched_quotes(app: &Arc<Mutex<App>>) -> Vec<CurrencyCode> {
    let app_lock = app.lock().unwrap();
    app_lock.watchlist.iter().map(|item| item.quote).collect()
}

/// Retourne le lookback courant
fn current_lookback(app: &Arc<Mutex<App>>) -> Lookback {
    let app_lock = app.lock().unwrap();
    app_lock.current_lookback
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// CONCEPT : Event Loop Pattern
// - Loop infinie : while app.is_running()
// - À chaque itération :
//   1. Traiter les résultats du worker
//   2. Dessiner l'interface (render)
//   3. Traiter les événements (input)
//   4. Mettre à jour l'état (update)
// ============================================================================

/// Exécute la boucle principale de l'application
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        // Vérifie si l'app est toujours en cours d'exécution
        // CONCEPT : Lock scope minimisé
        {
            let app_lock = app.lock().unwrap();
            if !app_lock.is_running() {
                break;
            }
        }

        // ========================================
        // 0. RÉSULTATS : Traite les résultats du worker
        // ========================================
        // CONCEPT : Non-blocking receive avec try_recv
        // - try_recv() ne bloque pas (contrairement à recv())
        match result_rx.try_recv() {
            Ok(result) => {
                let mut app_lock = app.lock().unwrap();
                apply_result(&mut app_lock, result);
            }
            Err(mpsc::TryRecvError::Empty) => {
                // Pas de résultat, c'est normal
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("Worker thread disconnected!");
                // Continue quand même, mais le worker est mort
            }
        }

        // ========================================
        // 1. RENDER : Dessine l'interface
        // ========================================
        {
            let app_clone = app.clone();
            terminal.draw(|frame| {
                let app_lock = app_clone.lock().unwrap();
                render(frame, &app_lock);
            })?;
        }

        // ========================================
        // 2. INPUT : Traite les événements
        // ========================================
        match events.next() {
            Ok(event) => {
                let mut app_lock = app.lock().unwrap();
                handle_event(&mut app_lock, event, &command_tx);
            }
            Err(_) => {
                // Erreur lors de la lecture d'événement
            }
        }

        // ========================================
        // 3. UPDATE : Met à jour l'état
        // ========================================
        {
            let mut app_lock = app.lock().unwrap();
            app_lock.tick();
        }
    }

    Ok(())
}

/// Applique un résultat du worker à l'état de l'application
fn apply_result(app: &mut App, result: AppResult) {
    match result {
        AppResult::PairSeriesLoaded { index, series } => {
            if let Some(item) = app.watchlist.get_mut(index) {
                info!(pair = %series.pair.display(), points = series.len(), "Updating watchlist item");
                item.series = Some(series);
            }
        }

        AppResult::CurrencyAdded { item } => {
            info!(currency = %item.quote.code(), "Adding currency to watchlist");
            app.watchlist.push(item);
        }

        AppResult::RatesRefreshed { rates } => {
            for (quote, rate) in rates {
                // Un fetch en échec (None) garde le taux précédent
                if let Some(rate) = rate {
                    if let Some(item) = app.watchlist.iter_mut().find(|i| i.quote == quote) {
                        item.spot_rate = Some(rate);
                    }
                }
            }
        }

        AppResult::BaseChanged { base, watchlist } => {
            info!(base = %base.code(), "Applying new base currency");
            app.base = base;
            app.watchlist = watchlist;
            app.selected_index = app
                .selected_index
                .min(app.watchlist.len().saturating_sub(1));
        }

        AppResult::InflationLoaded { series } => {
            app.cpi = Some(series);
        }

        AppResult::LoadError { what, error } => {
            error!(what = %what, error = %error, "Background load failed");
        }

        AppResult::AddError { code, error } => {
            error!(currency = %code, error = %error, "Failed to add currency");
        }
    }
}

// ============================================================================
// Gestion des événements
// ============================================================================
// CONCEPT : Event Handler Pattern
// - Sépare la logique de gestion des événements
// - Modifie l'état de app selon l'événement
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Guard clauses (if) pour filtrer les événements
/// - Navigation contextuelle selon l'écran actuel
fn handle_event(app: &mut App, event: lazyforex::ui::events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazyforex::ui::events::{
        get_char_from_event, is_add_event, is_backspace_event, is_base_event, is_delete_event,
        is_down_event, is_enter_event, is_escape_event, is_expenses_event, is_inflation_event,
        is_input_char_event, is_next_lookback_event, is_previous_lookback_event, is_quit_event,
        is_refresh_event, is_space_event, is_up_event, Event,
    };

    match event {
        // Touche 'q' : quit confirmation two-step
        // En mode saisie, 'q' est un caractère comme un autre
        Event::Key(_) if is_quit_event(&event) && !app.is_in_input_mode() => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        // ========================================
        // Input Mode : Gestion de la saisie
        // ========================================

        // ESC : annuler le mode input
        Event::Key(_) if is_escape_event(&event) && app.is_in_input_mode() => {
            info!("User cancelled input");
            app.cancel_input();
        }

        // Enter : valider la saisie selon son contexte
        Event::Key(_) if is_enter_event(&event) && app.is_in_input_mode() => {
            let (value, context) = app.submit_input();
            submit_input_value(app, value, context, command_tx);
        }

        // Backspace : supprimer le dernier caractère
        Event::Key(_) if is_backspace_event(&event) && app.is_in_input_mode() => {
            app.backspace();
        }

        // Caractères : ajouter au buffer
        Event::Key(_) if is_input_char_event(&event) && app.is_in_input_mode() => {
            if let Some(c) = get_char_from_event(&event) {
                app.append_char(c);
            }
        }

        // ========================================
        // Dashboard
        // ========================================

        // 'd' : supprimer la devise sélectionnée (two-step)
        Event::Key(_) if is_delete_event(&event) && app.is_on_dashboard() => {
            if !app.watchlist.is_empty() {
                if app.is_awaiting_delete_confirmation() {
                    let code = app
                        .selected_item()
                        .map(|item| item.quote.code())
                        .unwrap_or("?");
                    info!(currency = %code, "User confirmed delete");
                    app.delete_selected();
                } else {
                    info!("User requested delete (awaiting confirmation)");
                    app.request_delete();
                }
            }
        }

        // 'a' : ajouter une devise via le mode input
        Event::Key(_) if is_add_event(&event) && app.is_on_dashboard() => {
            info!("User requested add currency");
            app.cancel_quit();
            app.cancel_delete();
            app.start_input("Add currency: ".to_string(), InputContext::AddCurrency);
        }

        // Navigation dans la watchlist
        Event::Key(_) if is_up_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.navigate_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.navigate_down();
        }

        // Enter : afficher le graphique de la paire sélectionnée
        Event::Key(_) if is_enter_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            if let Some(item) = app.selected_item() {
                info!(currency = %item.quote.code(), "User opened chart view");
            }
            app.show_chart();
        }

        // 'b' : devise de base suivante, recharge toute la watchlist
        Event::Key(_) if is_base_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            app.next_base();
            info!(base = %app.base.code(), "User changed base currency");
            let _ = command_tx.send(AppCommand::ChangeBase { base: app.base });
        }

        // 'i' : vue inflation (recharge si la série manque)
        Event::Key(_) if is_inflation_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            info!("User opened inflation view");
            if app.cpi.is_none() {
                let _ = command_tx.send(AppCommand::LoadInflation);
            }
            app.show_inflation();
        }

        // 'e' : vue coût de vie
        Event::Key(_) if is_expenses_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            info!("User opened expenses view");
            app.show_expenses();
        }

        // 'r' : rafraîchir les taux spot
        Event::Key(_) if is_refresh_event(&event) && app.is_on_dashboard() => {
            app.cancel_quit();
            app.cancel_delete();
            info!("User requested rates refresh");
            let _ = command_tx.send(AppCommand::RefreshRates);
        }

        // ========================================
        // Vue graphique
        // ========================================

        // ESC ou SPACE : retour au dashboard
        Event::Key(_) if (is_escape_event(&event) || is_space_event(&event)) && app.is_on_chart() => {
            app.cancel_quit();
            app.show_dashboard();
        }

        // 'l' : lookback suivant, recharge la série
        Event::Key(_) if is_next_lookback_event(&event) && app.is_on_chart() => {
            app.cancel_quit();
            app.next_lookback();
            info!(lookback = %app.current_lookback.label(), "User changed to next lookback");
            reload_selected_series(app, command_tx);
        }

        // 'h' : lookback précédent, recharge la série
        Event::Key(_) if is_previous_lookback_event(&event) && app.is_on_chart() => {
            app.cancel_quit();
            app.previous_lookback();
            info!(lookback = %app.current_lookback.label(), "User changed to previous lookback");
            reload_selected_series(app, command_tx);
        }

        // ========================================
        // Vue inflation
        // ========================================

        Event::Key(_) if (is_escape_event(&event) || is_space_event(&event)) && app.is_on_inflation() => {
            app.cancel_quit();
            app.show_dashboard();
        }

        // ========================================
        // Vue coût de vie
        // ========================================

        Event::Key(_) if (is_escape_event(&event) || is_space_event(&event)) && app.is_on_expenses() => {
            app.cancel_quit();
            app.show_dashboard();
        }

        // Navigation dans les postes
        Event::Key(_) if is_up_event(&event) && app.is_on_expenses() => {
            app.cancel_quit();
            app.expense_up();
        }
        Event::Key(_) if is_down_event(&event) && app.is_on_expenses() => {
            app.cancel_quit();
            app.expense_down();
        }

        // Enter : éditer le montant du poste sélectionné
        Event::Key(_) if is_enter_event(&event) && app.is_on_expenses() => {
            app.cancel_quit();
            let index = app.expense_index;
            if let Some(entry) = app.budget.entries().get(index) {
                let prompt = format!("{}: ", entry.category.label());
                info!(category = %entry.category.label(), "User editing expense amount");
                app.start_input(prompt, InputContext::EditExpense(index));
            }
        }

        Event::Tick => {
            // Tick régulier : rien à faire pour l'instant
        }

        Event::Key(_) => {
            // Toute autre touche : annule les confirmations si actives
            app.cancel_quit();
            app.cancel_delete();
        }

        _ => {
            // Autres événements : ignorés
        }
    }
}

/// Applique une valeur saisie selon son contexte
fn submit_input_value(
    app: &mut App,
    value: String,
    context: InputContext,
    command_tx: &mpsc::Sender<AppCommand>,
) {
    match context {
        InputContext::AddCurrency => {
            let value = value.trim().to_uppercase();
            match CurrencyCode::from_code(&value) {
                Some(quote) if quote == app.base => {
                    debug!(currency = %value, "Cannot watch the base currency itself");
                }
                Some(quote) if app.watchlist.iter().any(|i| i.quote == quote) => {
                    debug!(currency = %value, "Currency already in watchlist");
                }
                Some(quote) => {
                    info!(currency = %quote.code(), "User submitted currency for adding");
                    let _ = command_tx.send(AppCommand::AddCurrency { quote });
                }
                None => {
                    debug!(input = %value, "Unknown currency code, ignoring");
                }
            }
        }

        InputContext::EditExpense(index) => {
            match value.trim().parse::<f64>() {
                Ok(amount) => {
                    info!(index, amount, "User updated expense amount");
                    app.budget.set_amount(index, amount);
                }
                Err(_) => {
                    debug!(input = %value, "Unparseable expense amount, ignoring");
                }
            }
        }
    }
}

/// Envoie la commande de rechargement pour la paire sélectionnée
fn reload_selected_series(app: &App, command_tx: &mpsc::Sender<AppCommand>) {
    if let Some(item) = app.selected_item() {
        let _ = command_tx.send(AppCommand::ReloadPairSeries {
            quote: item.quote,
            lookback: app.current_lookback,
            index: app.selected_index,
        });
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// CONCEPT RUST : Terminal raw mode
// - Raw mode : on reçoit tous les caractères directement
// - Alternate screen : écran secondaire (ne pollue pas l'historique)
//
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
///
/// Appelé dans main() même en cas d'erreur, pour ne pas laisser
/// le terminal cassé
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}

// ============================================================================
// Notes pédagogiques
// ============================================================================
//
// CONCEPTS RUST DE CE FICHIER :
//
// 1. Providers comme collaborateurs explicites
//    - Construits une fois dans main()
//    - Déplacés dans le worker thread (ownership)
//    - Le reste du code ne voit que les traits
//
// 2. Command pattern avec channels
//    - AppCommand : l'UI demande, le worker exécute
//    - AppResult : le worker répond, l'UI applique
//    - try_recv() côté UI pour ne jamais bloquer le rendu
//
// 3. Lock scope minimisé
//    - Jamais de Mutex verrouillé pendant un appel réseau
//    - Lire l'état, unlock, fetch, lock, écrire
//
// ============================================================================
