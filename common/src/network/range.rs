/// Collapses runs of consecutive ports into `start-end` strings.
///
/// Ports are walked in the given order, nothing is sorted or deduplicated.
/// A run only continues while every port is exactly one more than the
/// previous one.
pub fn consolidate<I>(ports: I) -> Vec<String>
where
    I: IntoIterator<Item = u16>,
{
    let mut output: Vec<String> = Vec::new();
    let mut ports = ports.into_iter();

    let Some(first) = ports.next() else {
        return output;
    };

    let mut start: u16 = first;
    let mut prev: u16 = first;

    for port in ports {
        if prev.checked_add(1) == Some(port) {
            prev = port;
            continue;
        }
        output.push(span_to_string(start, prev));
        start = port;
        prev = port;
    }

    output.push(span_to_string(start, prev));
    output
}

fn span_to_string(start: u16, end: u16) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}-{end}")
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
