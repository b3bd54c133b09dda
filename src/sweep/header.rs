//! Scraping of free-form header lines.
//!
//! Every function here is best-effort: a line that does not have the expected
//! shape yields `None` or is skipped, it never fails the parse.

use serde::Serialize;

/// Prefix of the line holding the multi-sweep options
pub const SWEEP_OPTIONS_MARKER: &str = "#sweep_multi_options:=";

/// Prefixes of user comment lines
pub const COMMENT_PREFIXES: [&str; 2] = ["#comment:=", "#com ...:="];

/// Prefix of device values logged at sweep start
pub const DEVICE_LOG_PREFIX: &str = "#com ...:=";

const BEFORE_WAIT_MARKER: &str = "beforewait': [";

/// Value of a device recorded in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceLog {
    /// Device name
    pub device: String,
    /// Logged value, verbatim
    pub value: String,
}

/// Locate the line describing the sweep options
///
/// The last line starting with [`SWEEP_OPTIONS_MARKER`] wins. Older logs without
/// that marker keep the options three lines before the end of the header.
pub fn sweep_options_line(headers: &[String]) -> Option<&str> {
    if let Some(line) = headers
        .iter()
        .rev()
        .find(|line| line.starts_with(SWEEP_OPTIONS_MARKER))
    {
        return Some(line);
    }

    headers
        .len()
        .checked_sub(3)
        .map(|i| headers[i].as_str())
        .filter(|line| line.contains("sweep"))
}

/// Parse `start` and `stop` from comma-separated `key value` tokens
///
/// The key is the word preceding the value, stripped of quotes, braces and
/// colons. Values that do not parse are ignored.
pub fn parse_sweep_bounds(line: &str) -> (Option<f64>, Option<f64>) {
    let mut start = None;
    let mut stop = None;

    for token in line.split(',') {
        let words: Vec<&str> = token.split_whitespace().collect();
        let [.., key, value] = words.as_slice() else {
            continue;
        };

        let key = key.trim_matches(|c: char| matches!(c, '\'' | '"' | '{' | ':'));
        let value = value.trim_matches(|c: char| matches!(c, '\'' | '"' | '}' | ';'));

        if key.starts_with("start") {
            if let Ok(v) = value.parse() {
                start = Some(v);
            }
        } else if key.starts_with("stop") {
            if let Ok(v) = value.parse() {
                stop = Some(v);
            }
        }
    }

    (start, stop)
}

/// Extract the pre-measurement settle times of each swept device
///
/// Reads the bracketed list following `beforewait': [` in the sweep-options
/// line, e.g. `{'beforewait': [0.02, 0.02], ...}`.
pub fn extract_before_wait(headers: &[String]) -> Option<Vec<f64>> {
    let line = sweep_options_line(headers)?;
    let (_, rest) = line.split_once(BEFORE_WAIT_MARKER)?;
    let (list, _) = rest.split_once(']')?;

    list.split(',')
        .map(|v| v.trim().parse::<f64>().ok())
        .collect()
}

/// Partition header lines into `(config, comments)`
///
/// Comment lines lose their prefix. Order is preserved within each partition.
pub fn split_config_and_comments(headers: &[String]) -> (Vec<String>, Vec<String>) {
    let mut config = Vec::new();
    let mut comments = Vec::new();

    for line in headers {
        match COMMENT_PREFIXES
            .iter()
            .find_map(|prefix| line.strip_prefix(prefix))
        {
            Some(comment) => comments.push(comment.to_string()),
            None => config.push(line.clone()),
        }
    }

    (config, comments)
}

/// Collect device values from `#com ...:= device: value` lines
pub fn extract_device_logs(headers: &[String]) -> Vec<DeviceLog> {
    headers
        .iter()
        .filter(|line| line.starts_with(DEVICE_LOG_PREFIX))
        .filter_map(|line| {
            let words: Vec<&str> = line.split(' ').collect();
            let name = words.get(2)?;
            let mut chars = name.chars();
            chars.next_back()?;
            let value = words.last()?;
            Some(DeviceLog {
                device: chars.as_str().to_string(),
                value: value.to_string(),
            })
        })
        .filter(|log| !log.device.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sweep_options_line_by_marker() {
        let headers = lines(&[
            "#sweep_multi_options:= {'start': 0}",
            "#something",
            "#other",
            "#x\ty",
        ]);
        assert_eq!(
            sweep_options_line(&headers),
            Some("#sweep_multi_options:= {'start': 0}")
        );
    }

    #[test]
    fn test_sweep_options_line_by_position() {
        let headers = lines(&["#sweep_options:= dev, start 0", "#shape", "#x\ty"]);
        assert_eq!(sweep_options_line(&headers), Some("#sweep_options:= dev, start 0"));

        let headers = lines(&["#plain", "#shape", "#x\ty"]);
        assert_eq!(sweep_options_line(&headers), None);

        assert_eq!(sweep_options_line(&lines(&["#x\ty"])), None);
    }

    #[test]
    fn test_parse_bounds_dict_style() {
        let line = "#sweep_multi_options:= {'beforewait': [0.02, 0.02], 'start': -1.5, 'stop': 2e-3}";
        assert_eq!(parse_sweep_bounds(line), (Some(-1.5), Some(0.002)));
    }

    #[test]
    fn test_parse_bounds_key_value_style() {
        let line = "#sweep_options:= dev gate, start 0, stop 4, npts 5";
        assert_eq!(parse_sweep_bounds(line), (Some(0.0), Some(4.0)));
    }

    #[test]
    fn test_parse_bounds_failures_are_ignored() {
        let line = "#sweep_options:= start abc, stop 1";
        assert_eq!(parse_sweep_bounds(line), (None, Some(1.0)));
        assert_eq!(parse_sweep_bounds("#nothing here"), (None, None));
    }

    #[test]
    fn test_before_wait() {
        let two = lines(&[
            "#sweep_multi_options:= {'out': None, 'beforewait': [0.02, 0.5], 'updown': False};",
            "#shape",
            "#x\ty",
        ]);
        assert_eq!(extract_before_wait(&two), Some(vec![0.02, 0.5]));

        let one = lines(&["#sweep_multi_options:= {'beforewait': [0.1]}"]);
        assert_eq!(extract_before_wait(&one), Some(vec![0.1]));
    }

    #[test]
    fn test_before_wait_malformed() {
        let headers = lines(&["#sweep_multi_options:= {'beforewait': [0.1, fast]}"]);
        assert_eq!(extract_before_wait(&headers), None);

        let headers = lines(&["#sweep_multi_options:= {'beforewait': []}"]);
        assert_eq!(extract_before_wait(&headers), None);

        let headers = lines(&["#sweep_multi_options:= {'updown': True}"]);
        assert_eq!(extract_before_wait(&headers), None);

        assert_eq!(extract_before_wait(&[]), None);
    }

    #[test]
    fn test_split_config_and_comments() {
        let headers = lines(&[
            "#dev1:= instrument A",
            "#comment:= first cooldown",
            "#com ...:= dmm1: 0.25",
            "#x\ty",
        ]);
        let (config, comments) = split_config_and_comments(&headers);
        assert_eq!(config, lines(&["#dev1:= instrument A", "#x\ty"]));
        assert_eq!(comments, lines(&[" first cooldown", " dmm1: 0.25"]));
    }

    #[test]
    fn test_device_logs() {
        let headers = lines(&[
            "#com ...:= dmm1: 0.25",
            "#com ...:= magnet: 1.5",
            "#com ...:=",
            "#comment:= not a device",
        ]);
        let logs = extract_device_logs(&headers);
        assert_eq!(
            logs,
            vec![
                DeviceLog {
                    device: "dmm1".to_string(),
                    value: "0.25".to_string()
                },
                DeviceLog {
                    device: "magnet".to_string(),
                    value: "1.5".to_string()
                },
            ]
        );
    }
}
