//! Horizon Keybind Shortcut Tour
//!
//! Console walkthrough of the shortcut registry:
//! - Registrations from several simulated components
//! - Conflict reporting under the default Warn policy
//! - Chord and sequence dispatch against simulated key events
//! - A grouped help sheet rendered from the registry
//!
//! Run with: cargo run -p horizon-keybind --example shortcut_help

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_keybind::{
    Key, KeyEvent, KeyboardModifiers, Platform, RegistryEvent, Shortcut, ShortcutRegistry,
};

/// Simulate one key press and report what the registry did with it.
fn press(registry: &ShortcutRegistry, key: Key, modifiers: KeyboardModifiers) {
    let mut event = KeyEvent::new(key, modifiers);
    let outcome = registry.dispatch(&mut event);
    println!(
        "  {:<14} invoked: {}  sequence pending: {:<5}  default prevented: {}",
        event.chord().to_string(),
        outcome.invoked.len(),
        outcome.pending_sequence,
        outcome.default_prevented
    );
}

fn print_help(registry: &ShortcutRegistry) {
    println!("\n=== Shortcut Help ===");
    for group in registry.help_groups() {
        println!("{}:", group.category);
        for entry in &group.entries {
            let keys = entry.keys.join(" then ");
            let state = if entry.enabled { "" } else { "  [disabled]" };
            println!(
                "  {:<22} {}  ({}){}",
                keys, entry.description, entry.component, state
            );
        }
    }
    println!("=====================");
}

fn main() {
    // Conflict warnings from the registry land on stderr via tracing.
    tracing_subscriber::fmt::init();

    let registry = ShortcutRegistry::new();

    // Watch the registry change as components come and go.
    registry.subscribe(|event| match event {
        RegistryEvent::Registered(id) => println!("  [registry] registered {id:?}"),
        RegistryEvent::Unregistered(id) => println!("  [registry] unregistered {id:?}"),
        RegistryEvent::Cleared => println!("  [registry] cleared"),
    });

    // The platform's primary modifier, as "mod" resolves on this machine.
    let (primary, primary_shift) = if Platform::current().mod_is_meta() {
        (KeyboardModifiers::META, KeyboardModifiers::META_SHIFT)
    } else {
        (KeyboardModifiers::CTRL, KeyboardModifiers::CTRL_SHIFT)
    };

    println!("=== Component Registration ===");
    let saves = Arc::new(AtomicUsize::new(0));
    let save_count = saves.clone();
    registry
        .register(
            Shortcut::chord("mod+s", "Save file", move || {
                save_count.fetch_add(1, Ordering::SeqCst);
                println!("  [editor] saved");
            })
            .with_component("Editor")
            .with_category("File")
            .with_prevent_default(true),
        )
        .expect("valid spec");

    registry
        .register(
            Shortcut::chord("mod+shift+p", "Open command palette", || {
                println!("  [palette] opened");
            })
            .with_component("Palette")
            .with_category("Tools"),
        )
        .expect("valid spec");

    registry
        .register(
            Shortcut::sequence(&["g", "h"], "Go to home view", || {
                println!("  [navigator] home");
            })
            .with_component("Navigator")
            .with_category("Navigation"),
        )
        .expect("valid spec");

    registry
        .register(
            Shortcut::sequence(&["g", "i"], "Go to inbox view", || {
                println!("  [navigator] inbox");
            })
            .with_component("Navigator")
            .with_category("Navigation"),
        )
        .expect("valid spec");

    // A second claim on mod+s: the default Warn policy keeps both handlers
    // and logs a warning naming the two components.
    registry
        .register(
            Shortcut::chord("mod+s", "Save session", || {
                println!("  [workspace] session saved");
            })
            .with_component("Workspace")
            .with_category("File"),
        )
        .expect("valid spec");

    println!("\n=== Conflicts ===");
    for group in registry.conflicts() {
        let holders: Vec<&str> = group
            .handlers
            .iter()
            .map(|info| info.component.as_str())
            .collect();
        println!("  {} held by {}", group.binding, holders.join(", "));
    }

    println!("\n=== Simulated Input ===");
    press(&registry, Key::S, primary);
    press(&registry, Key::G, KeyboardModifiers::NONE);
    press(&registry, Key::H, KeyboardModifiers::NONE);
    press(&registry, Key::G, KeyboardModifiers::NONE);
    press(&registry, Key::I, KeyboardModifiers::NONE);
    press(&registry, Key::P, primary_shift);
    press(&registry, Key::X, KeyboardModifiers::NONE);
    println!("  total saves: {}", saves.load(Ordering::SeqCst));

    // Scoped registrations disappear with their component.
    println!("\n=== Scoped Registration ===");
    {
        let _guard = registry
            .register_scoped(
                Shortcut::chord("escape", "Dismiss overlay", || println!("  [overlay] closed"))
                    .with_component("Overlay")
                    .with_category("Tools"),
            )
            .expect("valid spec");
        press(&registry, Key::Escape, KeyboardModifiers::NONE);
    }
    press(&registry, Key::Escape, KeyboardModifiers::NONE);

    print_help(&registry);
}
