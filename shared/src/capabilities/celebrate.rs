use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

pub const CONFETTI_COLORS: [&str; 4] = ["#ff4d6d", "#ff8fa3", "#fff0f3", "#ffb3c1"];

/// One confetti burst. Fire-and-forget: the shell never answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfettiOperation {
    pub particle_count: u32,
    pub spread: f32,
    pub origin_y: f32,
    pub colors: Vec<String>,
}

impl Default for ConfettiOperation {
    fn default() -> Self {
        Self {
            particle_count: 150,
            spread: 70.0,
            origin_y: 0.6,
            colors: CONFETTI_COLORS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl Operation for ConfettiOperation {
    type Output = ();
}

pub struct Celebrate<Ev> {
    context: CapabilityContext<ConfettiOperation, Ev>,
}

impl<Ev> Capability<Ev> for Celebrate<Ev> {
    type Operation = ConfettiOperation;
    type MappedSelf<MappedEv> = Celebrate<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Celebrate::new(self.context.map_event(f))
    }
}

impl<Ev> Celebrate<Ev>
where
    Ev: Send + 'static,
{
    pub fn new(context: CapabilityContext<ConfettiOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn confetti(&self, burst: ConfettiOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(burst).await;
        });
    }
}
