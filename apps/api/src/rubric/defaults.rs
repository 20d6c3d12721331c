//! Built-in rubric tables. Used whenever a rubric file omits a field.

/// Section label → heading synonyms (normalized: lower-case, no punctuation).
pub const SECTION_HEADER_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "summary",
        &[
            "summary",
            "professional summary",
            "profile",
            "professional profile",
            "objective",
            "career objective",
            "about",
            "about me",
            "overview",
        ],
    ),
    (
        "experience",
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "employment history",
            "work history",
            "career history",
            "relevant experience",
        ],
    ),
    (
        "education",
        &[
            "education",
            "academic background",
            "academics",
            "education and training",
            "qualifications",
        ],
    ),
    (
        "skills",
        &[
            "skills",
            "technical skills",
            "core competencies",
            "competencies",
            "technologies",
            "tech stack",
            "expertise",
        ],
    ),
    (
        "certifications",
        &[
            "certifications",
            "certificates",
            "licenses",
            "licenses and certifications",
            "credentials",
        ],
    ),
    (
        "projects",
        &["projects", "personal projects", "selected projects", "portfolio"],
    ),
    (
        "contact",
        &["contact", "contact information", "contact details", "personal details"],
    ),
];

pub const ACTION_VERBS: &[&str] = &[
    "accelerated", "achieved", "administered", "analyzed", "architected", "automated",
    "built", "championed", "coached", "collaborated", "consolidated", "coordinated",
    "created", "cut", "delivered", "deployed", "designed", "developed", "directed",
    "drove", "engineered", "established", "executed", "expanded", "generated",
    "grew", "headed", "implemented", "improved", "increased", "initiated", "integrated",
    "introduced", "launched", "led", "maintained", "managed", "mentored", "migrated",
    "modernized", "negotiated", "optimized", "orchestrated", "organized", "oversaw",
    "owned", "pioneered", "planned", "produced", "reduced", "refactored", "resolved",
    "restructured", "revamped", "saved", "scaled", "shipped", "simplified", "spearheaded",
    "streamlined", "supervised", "trained", "transformed", "upgraded", "wrote",
];

/// Canonical skill → aliases. The canonical name always matches itself.
pub const SKILL_TAXONOMY: &[(&str, &[&str])] = &[
    ("JavaScript", &["js", "javascript", "ecmascript", "es6"]),
    ("TypeScript", &["ts", "typescript"]),
    ("Python", &["python", "python3"]),
    ("Java", &["java"]),
    ("Rust", &["rust", "rustlang"]),
    ("Golang", &["golang", "go lang"]),
    ("C++", &["c++", "cpp"]),
    ("C#", &["c#", "csharp"]),
    ("Ruby", &["ruby"]),
    ("PHP", &["php"]),
    ("Swift", &["swift"]),
    ("Kotlin", &["kotlin"]),
    ("SQL", &["sql"]),
    ("React", &["react", "reactjs", "react.js"]),
    ("React Native", &["react native"]),
    ("Angular", &["angular", "angularjs"]),
    ("Vue", &["vue", "vuejs", "vue.js"]),
    ("Node.js", &["node.js", "nodejs", "node js"]),
    ("Django", &["django"]),
    ("Flask", &["flask"]),
    ("Spring Boot", &["spring boot", "springboot"]),
    ("GraphQL", &["graphql"]),
    ("REST APIs", &["restful", "rest api", "rest apis", "restful apis"]),
    ("Microservices", &["microservices", "microservice architecture"]),
    ("AWS", &["aws", "amazon web services"]),
    ("Azure", &["azure", "microsoft azure"]),
    ("GCP", &["gcp", "google cloud", "google cloud platform"]),
    ("Docker", &["docker"]),
    ("Kubernetes", &["kubernetes", "k8s"]),
    ("Terraform", &["terraform"]),
    ("CI/CD", &["ci/cd", "cicd", "continuous integration", "continuous delivery"]),
    ("Jenkins", &["jenkins"]),
    ("Git", &["git", "github", "gitlab"]),
    ("Linux", &["linux", "unix"]),
    ("PostgreSQL", &["postgresql", "postgres"]),
    ("MySQL", &["mysql"]),
    ("MongoDB", &["mongodb", "mongo"]),
    ("Redis", &["redis"]),
    ("Kafka", &["kafka", "apache kafka"]),
    ("Database Design", &["database design", "data modeling", "schema design"]),
    ("Machine Learning", &["machine learning", "ml"]),
    ("Deep Learning", &["deep learning", "neural networks"]),
    ("TensorFlow", &["tensorflow"]),
    ("PyTorch", &["pytorch"]),
    ("Pandas", &["pandas"]),
    ("Data Analysis", &["data analysis", "data analytics"]),
    ("Statistics", &["statistics", "statistical analysis"]),
    ("Tableau", &["tableau"]),
    ("HTML", &["html", "html5"]),
    ("CSS", &["css", "css3", "sass", "scss"]),
    ("iOS", &["ios"]),
    ("Android", &["android"]),
    ("Flutter", &["flutter"]),
    ("Network Security", &["network security", "firewalls"]),
    ("Penetration Testing", &["penetration testing", "pentesting", "pen testing"]),
    ("Cryptography", &["cryptography", "encryption"]),
    ("Agile", &["agile", "scrum", "kanban"]),
    ("Project Management", &["project management", "program management"]),
    ("Leadership", &["leadership", "team leadership"]),
    ("Communication", &["communication", "public speaking"]),
];

/// Industry profile → weighted skills. Declaration order breaks ranking ties.
pub const INDUSTRY_PROFILES: &[(&str, &[(&str, f64)])] = &[
    (
        "Software Development",
        &[
            ("Java", 1.0),
            ("Python", 1.0),
            ("C++", 0.8),
            ("C#", 0.8),
            ("Golang", 0.8),
            ("Rust", 0.8),
            ("Git", 0.6),
            ("REST APIs", 0.6),
            ("Microservices", 0.6),
            ("SQL", 0.5),
            ("Agile", 0.4),
            ("JavaScript", 0.6),
            ("TypeScript", 0.6),
        ],
    ),
    (
        "Web Development",
        &[
            ("JavaScript", 1.0),
            ("TypeScript", 0.9),
            ("React", 1.0),
            ("Angular", 0.8),
            ("Vue", 0.8),
            ("Node.js", 0.9),
            ("HTML", 0.8),
            ("CSS", 0.8),
            ("GraphQL", 0.5),
            ("REST APIs", 0.6),
        ],
    ),
    (
        "Cloud Computing",
        &[
            ("AWS", 1.0),
            ("Azure", 1.0),
            ("GCP", 1.0),
            ("Docker", 0.8),
            ("Kubernetes", 0.9),
            ("Terraform", 0.8),
            ("Microservices", 0.6),
            ("Linux", 0.5),
        ],
    ),
    (
        "DevOps",
        &[
            ("CI/CD", 1.0),
            ("Docker", 0.9),
            ("Kubernetes", 0.9),
            ("Jenkins", 0.8),
            ("Terraform", 0.8),
            ("Linux", 0.8),
            ("Git", 0.6),
            ("AWS", 0.6),
        ],
    ),
    (
        "Data Science",
        &[
            ("Python", 0.9),
            ("Machine Learning", 1.0),
            ("Deep Learning", 0.8),
            ("TensorFlow", 0.7),
            ("PyTorch", 0.7),
            ("Pandas", 0.8),
            ("Statistics", 0.9),
            ("Data Analysis", 0.9),
            ("SQL", 0.6),
            ("Tableau", 0.5),
        ],
    ),
    (
        "Mobile Development",
        &[
            ("Swift", 1.0),
            ("Kotlin", 1.0),
            ("iOS", 1.0),
            ("Android", 1.0),
            ("React Native", 0.9),
            ("Flutter", 0.9),
        ],
    ),
    (
        "Cybersecurity",
        &[
            ("Network Security", 1.0),
            ("Penetration Testing", 1.0),
            ("Cryptography", 0.9),
            ("Linux", 0.6),
            ("Python", 0.4),
        ],
    ),
    (
        "Project Management",
        &[
            ("Project Management", 1.0),
            ("Agile", 0.9),
            ("Leadership", 0.8),
            ("Communication", 0.8),
        ],
    ),
];

pub const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "ph.d", "doctorate", "doctor of", "associate degree",
    "mba", "b.s.", "b.sc", "bsc", "b.a.", "m.s.", "m.sc", "msc", "m.a.", "b.tech",
    "m.tech", "b.eng", "m.eng", "diploma",
];

pub const INSTITUTION_KEYWORDS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "polytechnic",
];

pub const HONORS_KEYWORDS: &[&str] = &[
    "honors", "honours", "cum laude", "magna cum laude", "summa cum laude", "dean's list",
    "distinction", "valedictorian", "scholarship", "first class",
];

/// Field of study → (aliases, skills that make it relevant).
pub const FIELDS_OF_STUDY: &[(&str, &[&str], &[&str])] = &[
    (
        "Computer Science",
        &["computer science", "software engineering", "computer engineering", "informatics"],
        &["Java", "Python", "C++", "JavaScript", "Rust", "Golang", "SQL", "Database Design"],
    ),
    (
        "Information Technology",
        &["information technology", "information systems"],
        &["Linux", "AWS", "Azure", "Network Security", "SQL"],
    ),
    (
        "Data Science",
        &["data science", "statistics", "mathematics", "applied mathematics"],
        &["Python", "Machine Learning", "Statistics", "Data Analysis", "Pandas"],
    ),
    (
        "Electrical Engineering",
        &["electrical engineering", "electronics"],
        &["C++", "Python", "Linux"],
    ),
    (
        "Business Administration",
        &["business administration", "management", "business"],
        &["Project Management", "Leadership", "Communication"],
    ),
];

/// Inline placeholders that text extractors emit for tables, images and other objects.
pub const NON_TEXT_MARKERS: &[&str] = &[
    "[image]", "[table]", "[chart]", "[graphic]", "[figure]", "\u{fffc}",
];
