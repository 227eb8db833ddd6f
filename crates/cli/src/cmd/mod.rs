mod publish;

pub use publish::{PublishArgs, cmd_publish};
