use crate::constants::rulesets::RULE_TYPES;

/// A single rule from a ruleset, without a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub rule_type: String,
    pub rule_content: String,
    /// Trailing options such as `no-resolve`
    pub options: Vec<String>,
}

impl Rule {
    /// Parse `TYPE,VALUE[,option...]`
    pub fn parse(line: &str) -> Option<Rule> {
        let mut parts = line.split(',').map(str::trim);
        let rule_type = parts.next().filter(|t| !t.is_empty())?;
        let rule_content = parts.next().filter(|c| !c.is_empty())?;
        Some(Rule {
            rule_type: rule_type.to_string(),
            rule_content: rule_content.to_string(),
            options: parts.filter(|o| !o.is_empty()).map(str::to_string).collect(),
        })
    }

    /// Render the rule routed to `policy`, options go after the policy
    pub fn with_policy(&self, policy: &str) -> String {
        let mut rule = format!("{},{},{}", self.rule_type, self.rule_content, policy);
        for option in &self.options {
            rule.push(',');
            rule.push_str(option);
        }
        rule
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Extract rule lines from a ruleset body
///
/// The body is normally a Clash rule provider document with a `payload:` list.
/// When there is no payload, plain lines starting with a known rule type are
/// taken instead. Comments and blank lines are skipped either way.
pub fn parse_ruleset_payload(content: &str) -> Vec<String> {
    let lines = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let mut rules = Vec::new();
    let mut in_payload = false;
    for line in lines.clone() {
        if line.starts_with("payload:") {
            in_payload = true;
            continue;
        }
        if !in_payload {
            continue;
        }
        match line.strip_prefix("- ") {
            Some(item) => {
                let rule = strip_quotes(item.trim());
                if !rule.is_empty() {
                    rules.push(rule.to_string());
                }
            }
            // Any other key ends the list
            None => break,
        }
    }

    if rules.is_empty() {
        rules = lines
            .filter(|line| RULE_TYPES.iter().any(|t| line.starts_with(t)))
            .map(str::to_string)
            .collect();
    }
    rules
}
