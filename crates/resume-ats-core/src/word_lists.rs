//! Curated word lists for resume analysis.
//!
//! Technology and business whitelists exempt from spelling checks, the
//! common-verb set used by the structural checks, the passive auxiliaries,
//! and the action verbs counted by the tone scorer.
//!
//! Every entry is lowercase and letters-only, because lookups happen after
//! [`crate::text::letters_only`] and lowercasing ("node.js" is stored as
//! "nodejs", "ci/cd" as "cicd").

use std::collections::HashSet;
use std::sync::LazyLock;

/// Technology terms: languages, frameworks, cloud and infrastructure, data
/// stores, DevOps tooling, and methodologies.
pub static TECH_TERMS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Languages
        "javascript", "typescript", "python", "java", "golang", "rust", "kotlin", "swift",
        "scala", "ruby", "php", "perl", "csharp", "cpp", "haskell", "elixir", "erlang",
        "clojure", "dart", "lua", "matlab", "sql", "nosql", "plsql", "tsql", "bash", "shell",
        "powershell", "html", "css", "sass", "scss", "graphql", "solidity", "fortran", "cobol",
        "objectivec", "groovy", "julia",
        // Frameworks and libraries
        "react", "reactjs", "redux", "angular", "angularjs", "vue", "vuejs", "nuxt", "nextjs",
        "svelte", "nodejs", "node", "express", "expressjs", "django", "flask", "fastapi",
        "spring", "springboot", "rails", "laravel", "symfony", "dotnet", "aspnet", "jquery",
        "webpack", "vite", "babel", "tailwind", "bootstrap", "jest", "pytest", "junit",
        "mocha", "cypress", "selenium", "playwright", "pandas", "numpy", "scipy", "sklearn",
        "scikit", "pytorch", "tensorflow", "keras", "xgboost", "lightgbm", "huggingface",
        "langchain", "llamaindex", "openai", "spacy", "nltk", "matplotlib", "seaborn",
        "plotly", "chartjs", "flutter", "xamarin", "ionic", "electron",
        "swiftui", "uikit", "jetpack", "compose", "grpc", "protobuf", "rest", "restful",
        "soap", "websocket", "websockets", "oauth", "jwt", "saml", "openid",
        // Cloud and infrastructure
        "aws", "azure", "gcp", "lambda", "cloudformation", "cloudfront",
        "cloudwatch", "dynamodb", "rds", "sqs", "sns", "ecs", "eks", "fargate", "iam",
        "vpc", "bigquery", "gke", "aks", "heroku", "vercel", "netlify", "digitalocean",
        "openshift", "serverless", "microservices", "microservice", "kubernetes", "docker",
        "dockerfile", "helm", "istio", "envoy", "nginx", "apache", "linux", "unix", "ubuntu",
        "centos", "redhat", "vmware", "hyperv", "cdn", "dns", "tcp", "http", "https",
        "ssl", "tls", "vpn", "ipsec",
        // Data and databases
        "postgresql", "postgres", "mysql", "mariadb", "sqlite", "oracle", "mongodb", "redis",
        "cassandra", "couchbase", "elasticsearch", "opensearch", "snowflake",
        "redshift", "databricks", "hadoop", "hive", "spark", "pyspark", "kafka", "flink",
        "airflow", "dbt", "etl", "elt", "datalake", "lakehouse", "tableau", "powerbi",
        "looker", "excel", "vba", "sas", "spss", "stata", "pinecone", "weaviate", "faiss",
        "chromadb", "pgvector", "llm", "llms", "rag", "nlp", "genai", "mlops", "mlflow",
        "kubeflow", "sagemaker", "vertex",
        // DevOps and tooling
        "git", "github", "gitlab", "bitbucket", "jenkins", "circleci", "travisci",
        "argocd", "terraform", "ansible", "puppet", "chef", "pulumi", "prometheus",
        "grafana", "datadog", "splunk", "newrelic", "pagerduty", "sentry", "jira",
        "confluence", "trello", "asana", "figma", "sketch", "invision", "zeplin", "postman",
        "swagger", "openapi", "sonarqube", "vscode", "intellij", "xcode", "cicd", "devops",
        "devsecops", "sre", "gitops", "observability", "kubectl", "npm", "yarn", "pnpm",
        "pip", "maven", "gradle", "cmake",
        // Methodologies
        "agile", "scrum", "kanban", "lean", "tdd", "bdd", "ddd", "oop", "solid", "saas",
        "paas", "iaas", "api", "apis", "sdk", "sdks", "ui", "ux", "uiux", "qa", "ml", "ai",
        "bi", "crm", "erp", "sap", "salesforce", "hubspot", "ios", "android", "backend",
        "frontend", "fullstack", "middleware", "realtime", "scalable", "scalability",
        "uptime", "failover", "multithreading", "async",
    ]
    .into_iter()
    .collect()
});

/// Resume and business vocabulary: leadership verbs, governance and strategy
/// nouns, degree and certification terms.
pub static BUSINESS_TERMS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Leadership and delivery verbs
        "spearheaded", "architected", "orchestrated", "operationalized", "productionized",
        "productized", "onboarded", "upskilled", "mentored", "championed", "streamlined",
        "evangelized", "incentivized", "prioritized", "strategized", "benchmarked",
        "containerized", "refactored", "deployed", "automated", "optimized", "migrated",
        "scaled", "launched", "shipped", "drove", "led", "owned", "piloted", "revamped",
        "standardized", "modernized", "monetized", "upsold", "negotiated", "facilitated",
        // Governance and strategy nouns
        "stakeholder", "stakeholders", "roadmap", "roadmaps", "governance", "compliance",
        "kpi", "kpis", "okr", "okrs", "roi", "sla", "slas", "slo", "slos", "sow", "rfp",
        "rfps", "gtm", "pnl", "headcount", "backlog", "sprint",
        "sprints", "retrospective", "retrospectives", "standup", "standups", "workstream",
        "workstreams", "deliverable", "deliverables", "crossfunctional", "cross", "functional",
        "onboarding", "offboarding", "runbook", "runbooks", "postmortem", "postmortems",
        "playbook", "playbooks", "vendor", "vendors", "ecommerce", "fintech", "healthtech",
        "edtech", "startup", "startups", "enterprise", "synergy",
        "analytics", "dashboard", "dashboards", "pipeline", "pipelines", "workflow",
        "workflows", "metrics", "hipaa", "gdpr", "soc", "pci", "iso", "sox", "nist",
        // Degrees and certifications
        "bachelor", "bachelors", "master", "masters", "mba", "phd", "bsc", "msc", "bs",
        "ms", "ba", "ma", "beng", "meng", "gpa", "cum", "laude", "magna", "summa",
        "coursework", "capstone", "thesis", "certified", "certification", "certifications",
        "pmp", "csm", "cspo", "safe", "itil", "cissp", "cism", "cisa", "ceh", "oscp",
        "ccna", "ccnp", "comptia", "ckad", "cka", "togaf", "prince", "sixsigma", "six",
        "sigma", "associate", "practitioner", "professional", "nanodegree", "bootcamp",
    ]
    .into_iter()
    .collect()
});

/// Common verbs that mark a sentence as having a predicate.
///
/// Tokens ending in `-ed` or `-ing` count as verb-like without being listed.
pub static COMMON_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "is", "are", "was", "were", "be", "been", "being", "am", "have", "has", "had", "do",
        "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
        "shall", "go", "goes", "went", "make", "makes", "made", "get", "gets", "got",
        "build", "builds", "built", "lead", "leads", "led", "run", "runs", "ran", "drive",
        "drives", "drove", "own", "owns", "grow", "grows", "grew", "write", "writes", "wrote",
        "know", "knows", "knew", "think", "thinks", "thought", "take", "takes", "took",
        "give", "gives", "gave", "find", "finds", "found", "keep", "keeps", "kept", "begin",
        "begins", "began", "show", "shows", "bring", "brings", "brought", "hold", "holds",
        "held", "teach", "teaches", "taught", "sell", "sells", "sold", "win", "wins", "won",
        "set", "sets", "cut", "cuts", "put", "puts", "let", "lets", "seek", "seeks",
        "sought", "meet", "meets", "met", "spend", "spends", "spent", "send", "sends",
        "sent", "pay", "pays", "paid", "become", "becomes", "became", "use", "uses",
        "work", "works", "manage", "manages", "develop", "develops", "design", "designs",
        "create", "creates", "deliver", "delivers", "support", "supports", "help", "helps",
        "improve", "improves", "increase", "increases", "reduce", "reduces", "ensure",
        "ensures", "maintain", "maintains", "collaborate", "collaborates", "oversee",
        "oversees", "oversaw", "implement", "implements", "provide", "provides",
    ]
    .into_iter()
    .collect()
});

/// Auxiliaries that open a passive construction when followed by an `-ed` token.
pub const PASSIVE_AUXILIARIES: &[&str] = &["is", "was", "were", "are", "been", "being"];

/// Strong action verbs counted by the tone scorer.
pub const ACTION_VERBS: &[&str] = &[
    "led",
    "managed",
    "developed",
    "designed",
    "built",
    "implemented",
    "created",
    "improved",
    "increased",
    "reduced",
    "launched",
    "delivered",
    "optimized",
    "automated",
    "architected",
    "spearheaded",
    "drove",
];

/// Short title words matched as whole words during job-title scoring.
pub const SHORT_TITLE_ACRONYMS: &[&str] = &[
    "ios", "ml", "qa", "ai", "ui", "ux", "bi", "pm", "sre", "hr", "llm", "it",
];

/// Returns `true` if the lowercase, letters-only word is a whitelisted
/// technology or business term.
pub fn is_whitelisted(word: &str) -> bool {
    TECH_TERMS.contains(word) || BUSINESS_TERMS.contains(word)
}

/// Returns `true` if the lowercase, letters-only token looks like a verb.
pub fn is_verb_like(word: &str) -> bool {
    COMMON_VERBS.contains(word)
        || (word.len() > 3 && (word.ends_with("ed") || word.ends_with("ing")))
}
