//! Automation task construction.
//!
//! Turns validated search criteria into the LinkedIn search URL and the
//! natural-language goal the automation browser follows.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::AppConfig;
use crate::models::automation::{AutomationTask, ProxyConfig};
use crate::models::search::{JobListing, SearchCriteria};

const LINKEDIN_JOBS_SEARCH: &str = "https://www.linkedin.com/jobs/search/";

/// LinkedIn experience-level filter value for entry level.
const ENTRY_LEVEL_FILTER: &str = "2";

/// Characters `encodeURIComponent` leaves unescaped stay literal; all
/// other bytes are percent-encoded.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Number of listings requested per search.
pub const LISTINGS_PER_SEARCH: usize = 10;

/// Build the LinkedIn job-search URL for the given criteria.
pub fn linkedin_search_url(criteria: &SearchCriteria) -> String {
    format!(
        "{}?keywords={}&location={}&f_E={}",
        LINKEDIN_JOBS_SEARCH,
        utf8_percent_encode(&criteria.job_title, URI_COMPONENT),
        utf8_percent_encode(&criteria.location, URI_COMPONENT),
        ENTRY_LEVEL_FILTER,
    )
}

fn format_example() -> String {
    let example = vec![JobListing {
        title: "Product Manager".to_string(),
        company: "Google".to_string(),
        location: "San Francisco, CA".to_string(),
        salary: "$90,000 - $120,000/year".to_string(),
        url: "https://www.linkedin.com/jobs/view/123456".to_string(),
        posted_date: "1 day ago".to_string(),
    }];
    serde_json::to_string_pretty(&example).unwrap_or_default()
}

/// Build the goal text for the automation browser.
pub fn search_goal(criteria: &SearchCriteria) -> String {
    format!(
        "Navigate to LinkedIn jobs search page.

Extract {count} entry-level {title} jobs in {location}.

For each job, get:
- title: Job title
- company: Company name
- location: City and state
- salary: Salary range or \"Not listed\"
- url: Full job posting URL (click on job card to get the complete URL)
- postedDate: When posted (e.g. \"2 days ago\")

Return ONLY a JSON array in this exact format:
{example}

Important rules:
- Skip any sponsored or promoted jobs
- Click on each job card to get the full URL
- If salary is not shown, use \"Not listed\"
- Return ONLY the JSON array, no additional text or markdown
- Ensure all URLs are complete and clickable",
        count = LISTINGS_PER_SEARCH,
        title = criteria.job_title,
        location = criteria.location,
        example = format_example(),
    )
}

/// Assemble the automation run for one search.
pub fn build_task(criteria: &SearchCriteria, config: &AppConfig) -> AutomationTask {
    AutomationTask {
        url: linkedin_search_url(criteria),
        goal: search_goal(criteria),
        browser_profile: config.browser_profile.clone(),
        proxy_config: ProxyConfig {
            enabled: true,
            country_code: config.proxy_country_code.clone(),
        },
        timeout: config.automation_timeout_secs,
    }
}
