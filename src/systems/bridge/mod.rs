//! Transport between the overlay and the game host.
//!
//! The host writes one JSON command envelope per line on stdin and reads one
//! JSON callback per line from stdout. A tokio runtime on its own thread owns
//! both pipes; the app only ever touches the two channels.
use std::{env, sync::Mutex, thread};

use bevy::prelude::*;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout},
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
};

use crate::{
    data::{callbacks::HostCallback, commands::HudCommand, config::HudConfig},
    error::HudError,
};

pub const RESOURCE_ENV: &str = "HUD_RESOURCE_NAME";

pub struct HostBridgePlugin;
impl Plugin for HostBridgePlugin {
    fn build(&self, app: &mut App) {
        match HostBridge::spawn_stdio() {
            Ok(bridge) => {
                app.insert_resource(bridge)
                    .add_systems(PreUpdate, HostBridge::receive)
                    .add_systems(PostUpdate, HostBridge::forward);
            }
            Err(error) => error!("{error}; the overlay will not hear from the host"),
        }
    }
}

#[derive(Resource)]
pub struct HostBridge {
    inbound: Mutex<UnboundedReceiver<String>>,
    outbound: UnboundedSender<String>,
}

impl HostBridge {
    /// Returns the bridge plus the far ends of its channels: a sender for
    /// inbound lines and a receiver for outbound lines.
    pub fn channel() -> (Self, UnboundedSender<String>, UnboundedReceiver<String>) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let bridge = Self {
            inbound: Mutex::new(inbound_rx),
            outbound: outbound_tx,
        };
        (bridge, inbound_tx, outbound_rx)
    }

    pub fn spawn_stdio() -> Result<Self, HudError> {
        let (bridge, inbound, outbound) = Self::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(HudError::Bridge)?;

        thread::Builder::new()
            .name(String::from("hud-host-bridge"))
            .spawn(move || runtime.block_on(pump_stdio(inbound, outbound)))
            .map_err(HudError::Bridge)?;

        Ok(bridge)
    }

    fn receive(bridge: Res<HostBridge>, mut hud_commands: EventWriter<HudCommand>) {
        let Ok(mut inbound) = bridge.inbound.lock() else {
            return;
        };

        while let Ok(line) = inbound.try_recv() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match HudCommand::decode(line) {
                Ok(command) => {
                    hud_commands.write(command);
                }
                Err(error) => warn!("dropping malformed host command: {error}"),
            }
        }
    }

    fn forward(
        bridge: Res<HostBridge>,
        config: Res<HudConfig>,
        mut callbacks: EventReader<HostCallback>,
    ) {
        if callbacks.is_empty() {
            return;
        }

        let resource = resource_name(&config);
        for callback in callbacks.read() {
            debug!("callback `{}` -> host", callback.endpoint);
            if bridge.outbound.send(callback.to_wire(&resource)).is_err() {
                warn!("host bridge closed; dropped `{}` callback", callback.endpoint);
            }
        }
    }
}

/// Resolved on every send so a host can rename its resource at runtime.
pub fn resource_name(config: &HudConfig) -> String {
    env::var(RESOURCE_ENV)
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| config.resource_name.clone())
}

async fn pump_stdio(inbound: UnboundedSender<String>, mut outbound: UnboundedReceiver<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut reading = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if reading => match line {
                Ok(Some(line)) => {
                    if inbound.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    info!("host closed stdin");
                    reading = false;
                }
                Err(error) => {
                    warn!("failed to read from host: {error}");
                    reading = false;
                }
            },
            message = outbound.recv() => match message {
                Some(message) => {
                    if let Err(error) = write_line(&mut stdout, &message).await {
                        warn!("failed to write to host: {error}");
                    }
                }
                None => break,
            },
        }
    }
}

async fn write_line(stdout: &mut Stdout, message: &str) -> std::io::Result<()> {
    stdout.write_all(message.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
