use std::time::Duration;

use anyhow::Context;
use copilot_app_core::{
    AppCommand, AppKernel, AppState, AppStore, AuthMode, ChatBody, HttpBackend, KernelConfig,
    Lookup, ReadinessState, ShellView, StaticIdentity,
};
use copilot_core::{select_theme, ActiveAccount, FeatureKey, Theme};
use tracing::warn;

/// Everything `boot` needs to stand up a kernel against a live backend.
#[derive(Debug, Clone)]
pub struct BootOptions {
    pub backend_url: String,
    pub access_token: Option<String>,
    pub auth_mode: AuthMode,
    pub account: Option<ActiveAccount>,
    pub dark_mode: bool,
    pub plugins: bool,
    pub probe_interval: Duration,
    pub timeout: Duration,
    /// Extra time allowed for content safety and service info after readiness settles.
    pub lookup_grace: Duration,
}

impl Default for BootOptions {
    fn default() -> Self {
        Self {
            backend_url: copilot_config::DEFAULT_BACKEND_URL.to_string(),
            access_token: None,
            auth_mode: AuthMode::None,
            account: None,
            dark_mode: false,
            plugins: false,
            probe_interval: copilot_config::DEFAULT_PROBE_INTERVAL,
            timeout: copilot_config::DEFAULT_BOOT_TIMEOUT,
            lookup_grace: copilot_config::LOOKUP_GRACE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BootReport {
    pub transitions: Vec<(ReadinessState, ReadinessState)>,
    pub state: AppState,
    pub shell: ShellView,
    pub theme: Theme,
}

/// Runs the bootstrap until it settles and reports what happened.
pub async fn run_boot(opts: BootOptions) -> anyhow::Result<BootReport> {
    let backend = HttpBackend::new(&opts.backend_url, opts.access_token.clone())?;
    let identity = StaticIdentity::new(opts.auth_mode, opts.account.clone());

    let store = AppStore::default();
    let changes = store.subscribe();
    let mut kernel = AppKernel::new(
        store,
        identity.clone(),
        backend.clone(),
        backend.clone(),
        backend,
        KernelConfig {
            probe_interval: opts.probe_interval,
        },
    );

    kernel.dispatch(AppCommand::SetFeature {
        key: FeatureKey::DarkMode,
        enabled: opts.dark_mode,
    });
    kernel.dispatch(AppCommand::SetFeature {
        key: FeatureKey::PluginsPlannersAndPersonas,
        enabled: opts.plugins,
    });
    kernel.dispatch(AppCommand::Start);
    if opts.auth_mode == AuthMode::Required {
        // The static account stands in for a completed login redirect.
        identity.sign_in();
        kernel.dispatch(AppCommand::AuthStatusChanged);
    }

    kernel
        .run_until(opts.timeout, |s| s.readiness.is_terminal())
        .await
        .context("Bootstrap did not settle")?;
    if let Err(e) = kernel
        .run_until(opts.lookup_grace, |s| s.lookups_settled())
        .await
    {
        warn!("reporting without all service details: {e:#}");
    }

    let transitions = changes
        .try_iter()
        .filter(|c| c.is_transition())
        .map(|c| (c.before, c.after))
        .collect();

    Ok(BootReport {
        transitions,
        state: kernel.store.state(),
        shell: kernel.shell(),
        theme: kernel.theme(),
    })
}

pub async fn cmd_boot(opts: BootOptions) -> anyhow::Result<()> {
    println!(":: Booting {}", copilot_config::APP_TITLE);
    println!("   Backend: {}", opts.backend_url);

    let report = run_boot(opts).await?;

    println!("\n:: Readiness");
    for (from, to) in &report.transitions {
        println!("   {from:?} -> {to:?}");
    }

    println!("\n:: Shell");
    print_shell(&report.shell);

    println!("\n:: Theme");
    print_theme(&report.theme);

    println!("\n:: Conversations");
    print_conversations(&report.state);

    println!("\n:: Service");
    match &report.state.service_info {
        Some(info) => {
            println!("   Version:        {}", info.version);
            println!("   Plugins:        {}", info.available_plugins.len());
        }
        None => println!("   Version:        unknown"),
    }
    let safety = if report
        .state
        .pending_lookups
        .contains(&Lookup::ContentSafety)
    {
        "unknown"
    } else if report.state.content_safety_enabled {
        "enabled"
    } else {
        "disabled"
    };
    println!("   Content safety: {safety}");

    if report.state.readiness.is_failure() {
        match &report.state.last_failure {
            Some(failure) => anyhow::bail!("Bootstrap failed: {failure}"),
            None => anyhow::bail!("Bootstrap failed in {:?}", report.state.readiness),
        }
    }
    Ok(())
}

pub fn cmd_theme(path: &str, dark: bool) -> anyhow::Result<()> {
    print_theme(&select_theme(path, dark));
    Ok(())
}

fn print_shell(shell: &ShellView) {
    match shell {
        ShellView::SignIn { title } => println!("   Sign in to {title}"),
        ShellView::SigningOut { text } => println!("   {text}"),
        ShellView::Chat(vm) => {
            println!("   Title:   {}", vm.header.title);
            if let Some(name) = &vm.header.user_display_name {
                println!("   User:    {name}");
            }
            println!(
                "   Actions: {}",
                match (vm.header.show_corner_items, vm.header.show_plugin_gallery) {
                    (false, _) => "hidden",
                    (true, false) => "settings",
                    (true, true) => "settings, plugins",
                }
            );
            match &vm.body {
                ChatBody::BackendProbe => println!("   Body:    waiting for backend"),
                ChatBody::Loading { text } => println!("   Body:    {text}"),
                ChatBody::Error { text } => println!("   Body:    error: {text}"),
                ChatBody::ChatView => println!("   Body:    chat"),
            }
        }
    }
}

fn print_theme(theme: &Theme) {
    println!("   Path:       {} ({})", theme.path.key(), theme.path.title());
    println!("   Variant:    {:?}", theme.variant);
    println!("   Brand:      {}", theme.tokens.brand_background);
    println!("   Hover:      {}", theme.tokens.brand_background_hover);
    println!("   Foreground: {}", theme.tokens.brand_foreground);
    println!("   Background: {}", theme.tokens.neutral_background);
    println!("   Text:       {}", theme.tokens.neutral_foreground);
}

fn print_conversations(state: &AppState) {
    if state.conversations.is_empty() {
        println!("   (none)");
        return;
    }
    let mut chats: Vec<_> = state.conversations.values().collect();
    chats.sort_by(|a, b| b.created_on.cmp(&a.created_on));
    for chat in chats {
        let marker = if state.selected_conversation_id.as_deref() == Some(chat.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            " {marker} {:<24} {:<16} {}",
            chat.title,
            chat.path,
            chat.created_on.format("%Y-%m-%d %H:%M")
        );
    }
}
