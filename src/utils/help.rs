#[derive(Clone, Copy, Debug)]
pub struct OptionHelp {
    pub flag: &'static str,
    pub description: &'static str,
}

const OPTIONS: &[OptionHelp] = &[
    OptionHelp {
        flag: "-d",
        description: "Change SQL delimiter to \"@\" from \";\"",
    },
    OptionHelp {
        flag: "-q",
        description: "Quiet results - no status or completion messages",
    },
    OptionHelp {
        flag: "-n",
        description: "Execute all of the SQL as commands rather than queries (no answer sets)",
    },
    OptionHelp {
        flag: "-s",
        description: "Execute everything as a query. SELECT, WITH and VALUES are queries by default",
    },
    OptionHelp {
        flag: "-r",
        description: "Return the result set as an array of values",
    },
    OptionHelp {
        flag: "-t",
        description: "Time the statement and return the number of times it executes in 1 second",
    },
    OptionHelp {
        flag: "-j",
        description: "Create a pretty JSON representation. Only the first column is formatted",
    },
    OptionHelp {
        flag: "-a",
        description: "Return all rows in the answer set and do not limit display",
    },
    OptionHelp {
        flag: "-i",
        description: "Show the full result in the interactive viewer",
    },
    OptionHelp {
        flag: "-pb",
        description: "Plot the results as a bar chart",
    },
    OptionHelp {
        flag: "-pl",
        description: "Plot the results as a line chart",
    },
    OptionHelp {
        flag: "-pp",
        description: "Plot the results as a pie chart",
    },
    OptionHelp {
        flag: "-sampledata",
        description: "Create and load the EMPLOYEE and DEPARTMENT tables",
    },
];

pub fn list_options() -> &'static [OptionHelp] {
    OPTIONS
}

pub fn build_options_help() -> String {
    let width = list_options()
        .iter()
        .map(|option| option.flag.len())
        .max()
        .unwrap_or(0);

    let mut output = String::from(
        "SQL Options\nOptions come before the SQL text and are always preceded with a minus sign (i.e. -q).\n\n",
    );
    for option in list_options() {
        output.push_str(&format!(
            "  {:<width$}  {}\n",
            option.flag,
            option.description,
            width = width
        ));
    }
    output
}

pub const CONNECT_HELP: &str = "\
Connecting to the database
The CONNECT command has the following format:

  CONNECT TO <database> USER <userid> USING <password|?> HOST <ip address> PORT <port number>

If you use a \"?\" for the password field, the system prompts for a password so it is not
typed as clear text. If a connection is not successful, the error returned by the driver is shown.

When prompted for the host you can use the form ip:port or #x:port, where #x stands for
172.17.0.x (the usual container address).

If the connection is successful the parameters are saved and reused the next time you run
a statement, or when you issue CONNECT with no parameters.
CONNECT RESET deletes the saved values; you will need to issue a new CONNECT.

CONNECT without any parameters prompts for the values. Press return to accept a default:
  Database      ORCL
  Host          localhost
  Port          1521
  Userid        SYSTEM
  Password      password
  Maximum rows  10 lines of output are displayed when a result set is returned
";
