use clap::Args;
use liminal_core::capture;

use super::print_json;

#[derive(Args)]
pub struct CaptureArgs {
    /// Text to capture, e.g. "Review PR e:1h !high"
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,

    /// Route the text as a chat message (help, theme, update, new task)
    #[arg(long)]
    interpret: bool,
}

pub fn run(args: CaptureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.text.join(" ");

    if args.interpret {
        return print_json(&capture::interpret(&text));
    }

    let payload = capture::parse(&text);
    if payload.title.is_empty() {
        tracing::warn!(input = %text, "capture left an empty title");
    }
    print_json(&payload)
}
