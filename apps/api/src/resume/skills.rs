//! Dictionary-based skill detection.
//!
//! The dictionary is grouped by category for maintenance only; categories never
//! reach the output. Matchers are compiled once and shared read-only across
//! requests.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::resume::sections::{SectionKind, SectionMap};

/// Upper bound on skills detected from text, before the baseline is added.
pub const MAX_DETECTED_SKILLS: usize = 30;

/// Product policy: every profile carries these so job matching never sees a
/// near-empty skill list. This biases weak-signal profiles toward the same
/// baseline and is intentional.
pub const BASELINE_SKILLS: &[&str] = &["JavaScript", "HTML", "CSS", "SQL", "Git"];

const SKILL_DICTIONARY: &[(&str, &[&str])] = &[
    (
        "languages",
        &[
            "Python", "Java", "C#", "C++", "Ruby", "PHP", "Go", "Golang", "Rust", "Kotlin",
            "Scala", "Elixir", "Clojure", "R", "MATLAB", "Perl", "Swift", "Objective-C",
            "VB.NET", "F#", "Dart", "Haskell", "Erlang", "Lua", "Bash", "PowerShell", "Julia",
            "JavaScript", "TypeScript", "SQL", "Solidity",
        ],
    ),
    (
        "frontend",
        &[
            "React", "Vue.js", "Vue", "Angular", "Svelte", "Next.js", "Nuxt", "Ember.js",
            "Backbone.js", "jQuery", "HTML", "HTML5", "CSS", "CSS3", "SASS",
            "Bootstrap", "Tailwind CSS", "Gatsby", "Remix", "Material UI", "Redux", "Webpack", "Vite", "Babel",
            "PostCSS",
        ],
    ),
    (
        "databases",
        &[
            "MySQL", "PostgreSQL", "MongoDB", "Redis", "Oracle", "SQL Server", "SQLite",
            "Cassandra", "DynamoDB", "Elasticsearch", "Firebase", "CouchDB", "Neo4j",
            "Memcached", "MariaDB", "DocumentDB", "BigQuery", "Snowflake", "Redshift",
        ],
    ),
    (
        "cloud",
        &[
            "AWS", "Azure", "Google Cloud", "GCP", "Heroku", "DigitalOcean", "Linode",
            "Cloudflare", "Docker", "Kubernetes", "ECS", "EKS", "Lambda", "Cloud Functions",
            "App Engine", "Fargate", "OpenShift", "Cloud Run",
            "Azure Functions",
        ],
    ),
    (
        "devops",
        &[
            "Jenkins", "GitLab CI", "GitHub Actions", "CircleCI", "Travis CI", "CI/CD",
            "Ansible", "Terraform", "CloudFormation", "Vagrant", "Chef", "Puppet",
            "Prometheus", "Grafana", "ELK Stack", "Datadog", "New Relic", "Helm", "Nginx",
        ],
    ),
    (
        "version_control",
        &["Git", "GitHub", "GitLab", "Bitbucket", "SVN", "Mercurial", "Perforce"],
    ),
    (
        "testing",
        &[
            "Jest", "Mocha", "Chai", "Jasmine", "Karma", "Cypress", "Selenium", "Appium",
            "JUnit", "TestNG", "Pytest", "RSpec", "PHPUnit", "Mockito", "Playwright",
            "Postman", "Vitest",
        ],
    ),
    (
        "api",
        &[
            "REST API", "RESTful", "GraphQL", "gRPC", "SOAP", "JSON", "XML", "YAML",
            "WebSockets", "OpenAPI", "Swagger", "API Gateway", "OAuth", "JWT",
        ],
    ),
    (
        "frameworks",
        &[
            "Node.js", "Express.js", "Spring Boot", "Spring", "Django", "Flask", "FastAPI",
            "Fastify", "NestJS", "Laravel", "Symfony", "CodeIgniter", "Ruby on Rails", "Rails",
            ".NET", "ASP.NET", "ASP.NET Core", "Hibernate", "Entity Framework", "Sequelize",
            "TypeORM", "Prisma", "SQLAlchemy", "WordPress", "Drupal", "Magento",
        ],
    ),
    (
        "mobile",
        &[
            "React Native", "Flutter", "Android", "iOS", "Xamarin", "Ionic", "NativeScript",
            "SwiftUI", "Xcode", "Android Studio",
        ],
    ),
    (
        "data",
        &[
            "Apache Spark", "Spark", "Hadoop", "Kafka", "Airflow", "dbt", "Tableau",
            "Power BI", "Looker", "Jupyter", "Pandas", "NumPy", "Scikit-learn", "TensorFlow",
            "PyTorch", "Keras", "Machine Learning", "Deep Learning", "NLP", "Data Science",
            "Matplotlib", "Databricks",
        ],
    ),
    (
        "messaging",
        &[
            "RabbitMQ", "ActiveMQ", "AWS SQS", "Azure Service Bus", "Google Pub/Sub",
            "Redis Streams", "NATS",
        ],
    ),
    (
        "search",
        &["Solr", "OpenSearch", "Algolia"],
    ),
    (
        "methodologies",
        &[
            "Agile", "Scrum", "Kanban", "Waterfall", "DevOps", "TDD", "BDD", "SOLID",
            "Design Patterns",
        ],
    ),
    (
        "project_management",
        &[
            "JIRA", "Confluence", "Asana", "Trello", "Notion", "Slack", "Azure DevOps",
        ],
    ),
    (
        "platforms",
        &[
            "Linux", "Unix", "Windows", "macOS", "Ubuntu", "CentOS", "Debian", "SSH",
            "Microservices", "Serverless", "Event-driven", "Load Balancing",
            "Database Design", "System Design", "Blockchain", "Salesforce", "SAP", "IoT",
        ],
    ),
];

struct SkillMatcher {
    name: &'static str,
    pattern: Regex,
}

/// Builds a boundary-safe pattern for one skill name.
///
/// `\b` does not work for names ending in symbols (`C++`, `C#`), so the
/// boundary is "start/end of text or a non-word character". Short names are
/// stricter:
/// - one letter (`R`) only counts as a list item, so initials ("John R.
///   Smith") and "R&D" do not match;
/// - two characters are case-sensitive and may not run into a hyphen, so "go"
///   in prose and "Go-to-market" do not match. A sentence that opens with
///   "Go" still does; that false positive is accepted.
pub fn skill_pattern(skill: &str) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(skill);
    let pattern = match skill.chars().count() {
        0 | 1 => format!(r"(?m)(?:^|[,;:/|•])[ \t]*{escaped}[ \t]*(?:$|[,;/|])"),
        2 => format!(r"(?:^|[^\w]){escaped}(?:$|[^\w\-])"),
        _ => format!(r"(?i)(?:^|[^\w]){escaped}(?:$|[^\w])"),
    };
    Regex::new(&pattern)
}

static SKILL_MATCHERS: Lazy<Vec<SkillMatcher>> = Lazy::new(|| {
    let mut seen = HashSet::new();
    let mut matchers = Vec::new();
    for (_category, skills) in SKILL_DICTIONARY {
        for &name in skills.iter() {
            if !seen.insert(name) {
                continue;
            }
            match skill_pattern(name) {
                Ok(pattern) => matchers.push(SkillMatcher { name, pattern }),
                Err(e) => warn!("Skill pattern for {name:?} failed to compile: {e}"),
            }
        }
    }
    matchers
});

/// Detects dictionary skills, skills section first, then experience, then the
/// whole document, and unions in [`BASELINE_SKILLS`].
pub fn extract_skills(full_text: &str, sections: &SectionMap) -> Vec<String> {
    let sources = [
        sections.get(SectionKind::Skills),
        sections.get(SectionKind::Experience),
        Some(full_text),
    ];

    let mut found: Vec<String> = Vec::new();
    'sources: for text in sources.into_iter().flatten() {
        for matcher in SKILL_MATCHERS.iter() {
            if found.len() >= MAX_DETECTED_SKILLS {
                break 'sources;
            }
            if matcher.pattern.is_match(text) && !found.iter().any(|s| s == matcher.name) {
                found.push(matcher.name.to_string());
            }
        }
    }

    for baseline in BASELINE_SKILLS {
        if !found.iter().any(|s| s == baseline) {
            found.push(baseline.to_string());
        }
    }

    found
}

/// Number of unique entries in the dictionary.
pub fn dictionary_size() -> usize {
    SKILL_MATCHERS.len()
}
