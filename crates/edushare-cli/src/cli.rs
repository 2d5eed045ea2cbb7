//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// EduShare CLI - share and discover educational resources.
#[derive(Debug, Parser)]
#[command(name = "edushare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login(LoginArgs),

    /// Discard the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Create a new account
    Register(RegisterArgs),

    /// List connection requests and connections
    Connections(ConnectionsArgs),

    /// Send a connection request to a user
    Connect(TargetUserArgs),

    /// Accept an incoming connection request
    Accept(FriendshipIdArg),

    /// Reject an incoming connection request
    Reject(FriendshipIdArg),

    /// Cancel a connection request you sent
    Cancel(FriendshipIdArg),

    /// Remove an existing connection
    Remove(FriendshipIdArg),

    /// Browse educators, annotated with your relationship to each
    Educators(EducatorsArgs),

    /// Show a user's profile and uploads
    Profile(ProfileArgs),

    /// Update your own profile
    Settings(SettingsArgs),

    /// Browse and manage resources
    Resources(ResourcesArgs),

    /// Your download history
    Downloads(DownloadsArgs),

    /// Your saved resources
    Saved,

    /// Ratings you have given
    Ratings,

    /// Ratings received on your uploads
    Feedback,

    /// Overview of your uploads, downloads and ratings
    Dashboard,

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the login command.
#[derive(Debug, Parser)]
pub struct LoginArgs {
    /// Username
    pub username: String,

    /// Password (prompted when omitted)
    #[arg(short = 'P', long)]
    pub password: Option<String>,
}

/// Arguments for the register command.
#[derive(Debug, Parser)]
pub struct RegisterArgs {
    /// Username
    pub username: String,

    /// Email address
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// Institution
    #[arg(short, long)]
    pub institution: Option<String>,

    /// Bio
    #[arg(short, long)]
    pub bio: Option<String>,

    /// Start with a private profile
    #[arg(long)]
    pub private: bool,
}

/// Which connection list to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConnectionTab {
    /// Pending requests addressed to you
    Incoming,
    /// Pending requests you sent
    Sent,
    /// Accepted connections
    Connected,
}

/// Arguments for the connections command.
#[derive(Debug, Parser)]
pub struct ConnectionsArgs {
    /// Show only one list
    #[arg(short, long, value_enum)]
    pub tab: Option<ConnectionTab>,
}

/// A command that targets another user by id.
#[derive(Debug, Parser)]
pub struct TargetUserArgs {
    /// The user's id
    pub user_id: i64,
}

/// A command that targets a friendship record by id.
#[derive(Debug, Parser)]
pub struct FriendshipIdArg {
    /// The request/connection id
    pub request_id: i64,
}

/// Arguments for the educators command.
#[derive(Debug, Parser)]
pub struct EducatorsArgs {
    /// Search by username, email or institution
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the profile command.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    /// The user's id (your own when omitted)
    pub user_id: Option<i64>,
}

/// Arguments for the settings command.
#[derive(Debug, Parser)]
pub struct SettingsArgs {
    /// New institution
    #[arg(short, long)]
    pub institution: Option<String>,

    /// New bio
    #[arg(short, long)]
    pub bio: Option<String>,

    /// Make the profile private
    #[arg(long, conflicts_with = "public")]
    pub private: bool,

    /// Make the profile public
    #[arg(long)]
    pub public: bool,
}

/// Arguments for the resources command.
#[derive(Debug, Parser)]
pub struct ResourcesArgs {
    #[command(subcommand)]
    pub action: ResourceAction,
}

/// Resource subcommands.
#[derive(Debug, Subcommand)]
pub enum ResourceAction {
    /// Browse resources
    List(ResourceListArgs),

    /// Show one resource
    Show(ResourceIdArg),

    /// Upload a new resource
    Upload(UploadArgs),

    /// Edit resource metadata
    Edit(EditArgs),

    /// Delete a resource you own
    Delete(ResourceIdArg),

    /// Download a resource (records the download, prints the file URL)
    Download(ResourceIdArg),

    /// Save (bookmark) a resource
    Save(ResourceIdArg),

    /// Remove a saved resource
    Unsave(ResourceIdArg),

    /// Rate a resource
    Rate(RateArgs),

    /// Show a resource's ratings
    Ratings(ResourceIdArg),
}

/// Arguments for resource listing.
#[derive(Debug, Parser)]
pub struct ResourceListArgs {
    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by subject
    #[arg(long)]
    pub subject: Option<String>,

    /// Filter by grade level
    #[arg(long)]
    pub grade_level: Option<String>,

    /// Filter by type (lesson_plan, worksheet, video, presentation,
    /// assessment, other)
    #[arg(long)]
    pub resource_type: Option<String>,
}

/// A command that targets a resource by id.
#[derive(Debug, Parser)]
pub struct ResourceIdArg {
    /// The resource id
    pub resource_id: i64,
}

/// Arguments for resource upload.
#[derive(Debug, Parser)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: String,

    /// Title
    #[arg(short, long)]
    pub title: String,

    /// Description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Resource type
    #[arg(short = 'r', long, default_value = "other")]
    pub resource_type: String,

    /// Subject
    #[arg(short, long)]
    pub subject: String,

    /// Grade level
    #[arg(short, long)]
    pub grade_level: String,
}

/// Arguments for resource editing.
#[derive(Debug, Parser)]
pub struct EditArgs {
    /// The resource id
    pub resource_id: i64,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New resource type
    #[arg(short = 'r', long)]
    pub resource_type: Option<String>,

    /// New subject
    #[arg(short, long)]
    pub subject: Option<String>,

    /// New grade level
    #[arg(short, long)]
    pub grade_level: Option<String>,
}

/// Arguments for rating a resource.
#[derive(Debug, Parser)]
pub struct RateArgs {
    /// The resource id
    pub resource_id: i64,

    /// Stars, 1 through 5
    pub rating: u8,

    /// Optional review text
    #[arg(short, long)]
    pub comment: Option<String>,
}

/// Arguments for the downloads command.
#[derive(Debug, Parser)]
pub struct DownloadsArgs {
    /// Clear the whole history
    #[arg(long)]
    pub clear: bool,

    /// Delete one history entry by id
    #[arg(long)]
    pub delete: Option<i64>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// List configured profiles
    List,

    /// Add or update a profile
    Set {
        /// Profile name
        name: String,
        /// Backend base URL (e.g. http://localhost:8000)
        #[arg(short, long)]
        api_url: String,
    },

    /// Switch the active profile
    Use {
        /// Profile name
        name: String,
    },
}
