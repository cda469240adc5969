use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::Assistant;
use crate::core::ToolCallRequest;

type MalformedCallback = Box<dyn Fn(&str) + Send + Sync>;

/// A JSON-lines front end for an [`Assistant`].
///
/// Each input line holds one tool call request (`{"id"?, "name",
/// "arguments"}`) and produces one serialized `ToolCallResult` line on the
/// output. A blank line or end of input closes the session. Requests without
/// an id are numbered `call_<n>`, where `n` counts the non-blank lines read
/// so far.
pub struct Console {
    assistant: Assistant,
    on_malformed: Option<MalformedCallback>,
}

impl Console {
    /// Creates a console that dispatches to `assistant`.
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant,
            on_malformed: None,
        }
    }

    /// Attaches a callback to be invoked with the parse error of every line
    /// that is not a valid request. Such lines are skipped.
    #[inline]
    pub fn on_malformed(
        mut self,
        on_malformed: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_malformed = Some(Box::new(on_malformed));
        self
    }

    /// Serves requests from `input` until a blank line or end of input.
    ///
    /// Returns the number of non-blank lines consumed.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> io::Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut count = 0usize;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            count += 1;

            let mut req: ToolCallRequest = match serde_json::from_str(line) {
                Ok(req) => req,
                Err(err) => {
                    warn!("skipping malformed request line: {err}");
                    if let Some(on_malformed) = &self.on_malformed {
                        on_malformed(&format!("malformed request: {err}"));
                    }
                    continue;
                }
            };
            if req.id.is_empty() {
                req.id = format!("call_{count}");
            }

            let result = self.assistant.call_tool(req).await;
            let mut encoded = serde_json::to_string(&result)?;
            encoded.push('\n');
            output.write_all(encoded.as_bytes()).await?;
            output.flush().await?;
        }

        debug!("console closed after {count} line(s)");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::AssistantBuilder;
    use crate::core::ToolCallResult;
    use crate::service::{FlightBookingService, seed_flights};

    fn assistant() -> Assistant {
        let service = Arc::new(FlightBookingService::new(seed_flights()));
        AssistantBuilder::with_service(service).build()
    }

    fn results(output: &[u8]) -> Vec<ToolCallResult> {
        std::str::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_console_session() {
        let errors = Arc::new(Mutex::new(Vec::<String>::new()));
        let console = Console::new(assistant()).on_malformed({
            let errors = Arc::clone(&errors);
            move |err| errors.lock().unwrap().push(err.to_owned())
        });

        let input = concat!(
            r#"{"name": "get_flight", "arguments": {"code": "LO123"}}"#,
            "\n",
            "not json\n",
            r#"{"id": "mine", "name": "get_flight", "arguments": {"code": "XX1"}}"#,
            "\n",
            "   \n",
            r#"{"id": "late", "name": "get_flight", "arguments": {"code": "LO456"}}"#,
            "\n",
        );
        let mut output = Vec::new();
        let count = console.run(input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(count, 3);

        let results = results(&output);
        let ids = results.iter().map(|r| r.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["call_1", "mine"]);
        assert!(!results[0].is_error);
        assert!(results[0].content.contains("\"LO123\""));
        assert_eq!(
            results[1].content,
            "ERROR calling tool get_flight: Flight 'XX1' not found"
        );

        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("malformed request: "));
    }

    #[tokio::test]
    async fn test_console_stops_at_end_of_input() {
        let console = Console::new(assistant());
        let input = concat!(
            r#"{"name": "list_flights", "arguments": {"departure": "warsaw", "destination": "gdansk"}}"#,
            "\n",
            r#"{"name": "find_booking", "arguments": {"booking_id": "nope"}}"#,
        );
        let mut output = Vec::new();
        let count = console.run(input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(count, 2);

        let results = results(&output);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "call_1");
        assert!(results[0].content.contains("\"LO456\""));
        assert_eq!(results[1].id, "call_2");
        assert!(results[1].is_error);
    }

    #[tokio::test]
    async fn test_console_empty_input() {
        let console = Console::new(assistant());
        let mut output = Vec::new();
        let count = console.run(&b""[..], &mut output).await.unwrap();
        assert_eq!(count, 0);
        assert!(output.is_empty());
    }
}
