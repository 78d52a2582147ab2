//! Built-in search engine catalog.
//!
//! Maps engine identifiers to URL templates. The table is static and
//! process-wide; parse-time validation guarantees that every query record
//! refers to an entry in it, so URL construction cannot fail at dispatch
//! time. Templates end at the query position; the query text is appended
//! after encoding.

use strum::{Display, EnumIter};

/// Engine used for query lines before the first `@engine` directive.
pub const DEFAULT_ENGINE: &str = "google";

/// Category tags for the `--engines` listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Display, EnumIter)]
pub enum EngineCategory {
    #[strum(serialize = "General Search")]
    General,
    #[strum(serialize = "Code & Dev")]
    Code,
    #[strum(serialize = "Security & OSINT")]
    Osint,
    #[strum(serialize = "Social Media")]
    Social,
    #[strum(serialize = "Video & Media")]
    Media,
    #[strum(serialize = "Images")]
    Images,
    #[strum(serialize = "Academic")]
    Academic,
    #[strum(serialize = "Documents")]
    Documents,
    #[strum(serialize = "News")]
    News,
    #[strum(serialize = "Archives")]
    Archives,
    #[strum(serialize = "Knowledge")]
    Knowledge,
    #[strum(serialize = "Maps")]
    Maps,
    #[strum(serialize = "Operator Shortcuts")]
    Operators,
}

/// How the query text is folded into the URL template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Percent-encode the query (the normal case)
    Percent,
    /// Append the query verbatim (wayback-style URL patterns)
    Raw,
    /// Standard base64 of the UTF-8 query (FOFA expects this)
    Base64,
}

/// One entry in the engine table
#[derive(Debug, PartialEq, Eq)]
pub struct Engine {
    pub name: &'static str,
    pub template: &'static str,
    pub encoding: QueryEncoding,
    pub category: EngineCategory,
}

impl Engine {
    /// Build the final URL for a query against this engine.
    ///
    /// Deterministic: the same query always produces the same URL.
    pub fn build_url(&self, query: &str) -> String {
        match self.encoding {
            QueryEncoding::Percent => format!("{}{}", self.template, urlencoding::encode(query)),
            QueryEncoding::Raw => format!("{}{}", self.template, query),
            QueryEncoding::Base64 => {
                use base64::Engine as _;
                let encoded = base64::engine::general_purpose::STANDARD.encode(query.as_bytes());
                format!("{}{}", self.template, encoded)
            }
        }
    }
}

/// Look up an engine by identifier.
pub fn lookup(name: &str) -> Option<&'static Engine> {
    ENGINES.iter().find(|e| e.name == name)
}

/// The engine used when a script sets none.
pub fn default_engine() -> &'static Engine {
    // ENGINES[0] is `google`, pinned by the table layout below.
    &ENGINES[0]
}

/// All known engines, in listing order.
pub fn all() -> &'static [Engine] {
    ENGINES
}

const fn eng(
    name: &'static str,
    template: &'static str,
    category: EngineCategory,
) -> Engine {
    Engine {
        name,
        template,
        encoding: QueryEncoding::Percent,
        category,
    }
}

use EngineCategory::*;

static ENGINES: &[Engine] = &[
    // General search
    eng("google", "https://www.google.com/search?q=", General),
    eng("bing", "https://www.bing.com/search?q=", General),
    eng("ddg", "https://duckduckgo.com/?q=", General),
    eng("duckduckgo", "https://duckduckgo.com/?q=", General),
    eng("yandex", "https://yandex.com/search/?text=", General),
    eng("baidu", "https://www.baidu.com/s?wd=", General),
    eng("yahoo", "https://search.yahoo.com/search?p=", General),
    eng("brave", "https://search.brave.com/search?q=", General),
    eng("startpage", "https://www.startpage.com/do/search?q=", General),
    eng("qwant", "https://www.qwant.com/?q=", General),
    eng("ecosia", "https://www.ecosia.org/search?q=", General),
    eng("mojeek", "https://www.mojeek.com/search?q=", General),
    eng("searx", "https://searx.be/search?q=", General),
    eng("marginalia", "https://search.marginalia.nu/search?query=", General),
    eng("naver", "https://search.naver.com/search.naver?query=", General),
    eng("sogou", "https://www.sogou.com/web?query=", General),
    // Code & developer
    eng("github", "https://github.com/search?q=", Code),
    eng("github-code", "https://github.com/search?type=code&q=", Code),
    eng("gitlab", "https://gitlab.com/search?search=", Code),
    eng("searchcode", "https://searchcode.com/?q=", Code),
    eng("sourcegraph", "https://sourcegraph.com/search?q=", Code),
    eng("npm", "https://www.npmjs.com/search?q=", Code),
    eng("pypi", "https://pypi.org/search/?q=", Code),
    eng("crates", "https://crates.io/search?q=", Code),
    eng("dockerhub", "https://hub.docker.com/search?q=", Code),
    eng("stackoverflow", "https://stackoverflow.com/search?q=", Code),
    eng("gist", "https://gist.github.com/search?q=", Code),
    // Security & OSINT
    eng("shodan", "https://www.shodan.io/search?query=", Osint),
    eng("censys", "https://search.censys.io/search?resource=hosts&q=", Osint),
    eng("zoomeye", "https://www.zoomeye.org/searchResult?q=", Osint),
    Engine {
        name: "fofa",
        template: "https://en.fofa.info/result?qbase64=",
        encoding: QueryEncoding::Base64,
        category: Osint,
    },
    eng("greynoise", "https://viz.greynoise.io/query?gnql=", Osint),
    eng("intelx", "https://intelx.io/?s=", Osint),
    eng("leakix", "https://leakix.net/search?scope=leak&q=", Osint),
    eng("virustotal", "https://www.virustotal.com/gui/search/", Osint),
    eng("urlscan", "https://urlscan.io/search/#", Osint),
    eng("crtsh", "https://crt.sh/?q=", Osint),
    eng("dnsdumpster", "https://dnsdumpster.com/?search=", Osint),
    eng("fullhunt", "https://fullhunt.io/search?query=", Osint),
    eng("netlas", "https://app.netlas.io/responses/?q=", Osint),
    eng("publicwww", "https://publicwww.com/websites/", Osint),
    // Social media
    eng("twitter", "https://twitter.com/search?q=", Social),
    eng("x", "https://twitter.com/search?q=", Social),
    eng("reddit", "https://www.reddit.com/search/?q=", Social),
    eng("linkedin", "https://www.linkedin.com/search/results/all/?keywords=", Social),
    eng("facebook", "https://www.facebook.com/search/top?q=", Social),
    eng("instagram", "https://www.instagram.com/explore/tags/", Social),
    eng("tiktok", "https://www.tiktok.com/search?q=", Social),
    eng("mastodon", "https://mastodon.social/tags/", Social),
    eng("bluesky", "https://bsky.app/search?q=", Social),
    eng("hackernews", "https://hn.algolia.com/?q=", Social),
    eng("quora", "https://www.quora.com/search?q=", Social),
    // Video & media
    eng("youtube", "https://www.youtube.com/results?search_query=", Media),
    eng("vimeo", "https://vimeo.com/search?q=", Media),
    eng("twitch", "https://www.twitch.tv/search?term=", Media),
    eng("rumble", "https://rumble.com/search/video?q=", Media),
    eng("google-videos", "https://www.google.com/search?tbm=vid&q=", Media),
    // Images
    eng("google-images", "https://www.google.com/search?tbm=isch&q=", Images),
    eng("bing-images", "https://www.bing.com/images/search?q=", Images),
    eng("yandex-images", "https://yandex.com/images/search?text=", Images),
    eng("flickr", "https://www.flickr.com/search/?text=", Images),
    eng("unsplash", "https://unsplash.com/s/photos/", Images),
    eng("tineye", "https://tineye.com/search?url=", Images),
    // Academic & research
    eng("scholar", "https://scholar.google.com/scholar?q=", Academic),
    eng("semantic-scholar", "https://www.semanticscholar.org/search?q=", Academic),
    eng("pubmed", "https://pubmed.ncbi.nlm.nih.gov/?term=", Academic),
    eng("arxiv", "https://arxiv.org/search/?query=", Academic),
    eng("core", "https://core.ac.uk/search?q=", Academic),
    eng("researchgate", "https://www.researchgate.net/search/publication?q=", Academic),
    eng("jstor", "https://www.jstor.org/action/doBasicSearch?Query=", Academic),
    eng("worldcat", "https://www.worldcat.org/search?q=", Academic),
    eng("openlibrary", "https://openlibrary.org/search?q=", Academic),
    // Documents & files
    eng("scribd", "https://www.scribd.com/search?query=", Documents),
    eng("slideshare", "https://www.slideshare.net/search?q=", Documents),
    eng("issuu", "https://issuu.com/search?q=", Documents),
    eng("google-books", "https://www.google.com/search?tbm=bks&q=", Documents),
    eng("libgen", "https://libgen.is/search.php?req=", Documents),
    // News
    eng("google-news", "https://news.google.com/search?q=", News),
    eng("bing-news", "https://www.bing.com/news/search?q=", News),
    eng("reuters", "https://www.reuters.com/site-search/?query=", News),
    eng("bbc", "https://www.bbc.co.uk/search?q=", News),
    eng("guardian", "https://www.theguardian.com/search?q=", News),
    eng("nytimes", "https://www.nytimes.com/search?query=", News),
    eng("apnews", "https://apnews.com/search?q=", News),
    // Archives & wayback
    Engine {
        name: "archive",
        template: "https://web.archive.org/web/*/",
        encoding: QueryEncoding::Raw,
        category: Archives,
    },
    eng("archive-today", "https://archive.today/search/?q=", Archives),
    eng("archive-org", "https://archive.org/search?query=", Archives),
    eng("google-cache", "https://webcache.googleusercontent.com/search?q=cache:", Archives),
    // Encyclopedias & knowledge
    eng("wikipedia", "https://en.wikipedia.org/w/index.php?search=", Knowledge),
    eng("wikidata", "https://www.wikidata.org/w/index.php?search=", Knowledge),
    eng("wikihow", "https://www.wikihow.com/wikiHowTo?search=", Knowledge),
    eng("wolfram", "https://www.wolframalpha.com/input?i=", Knowledge),
    eng("britannica", "https://www.britannica.com/search?query=", Knowledge),
    // Maps & geolocation
    eng("google-maps", "https://www.google.com/maps/search/", Maps),
    eng("openstreetmap", "https://www.openstreetmap.org/search?query=", Maps),
    eng("bing-maps", "https://www.bing.com/maps?q=", Maps),
    // Operator shortcuts (prepend the operator to the query)
    eng("google-site", "https://www.google.com/search?q=site:", Operators),
    eng("google-filetype", "https://www.google.com/search?q=filetype:", Operators),
    eng("google-intitle", "https://www.google.com/search?q=intitle:", Operators),
    eng("google-inurl", "https://www.google.com/search?q=inurl:", Operators),
    eng("google-intext", "https://www.google.com/search?q=intext:", Operators),
    eng("bing-site", "https://www.bing.com/search?q=site:", Operators),
    eng("ddg-site", "https://duckduckgo.com/?q=site:", Operators),
];
