use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

use bank_account_sim::{stateless, Account, AccountError, AccountOps};

/// Which of the two implementations the shell is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Stateful,
    Stateless,
}

impl Mode {
    fn label(self) -> &'static str {
        match self {
            Mode::Stateful => "OOP (stateful)",
            Mode::Stateless => "functional (stateless)",
        }
    }
}

/// Caller-side state for the stateless implementation: the balance and
/// overdraft limit threaded through the pure functions
struct FunctionalSession {
    balance: Decimal,
    overdraft_limit: Decimal,
}

impl AccountOps for FunctionalSession {
    fn deposit(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.balance = stateless::deposit(self.balance, amount)?;
        Ok(self.balance)
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.balance = stateless::withdraw(self.balance, amount, self.overdraft_limit)?;
        Ok(self.balance)
    }

    fn balance(&self) -> Decimal {
        stateless::balance(self.balance)
    }
}

/// Bank account simulator
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Implementation to start in
    #[clap(long, value_enum)]
    mode: Option<Mode>,
}

/// Interactive menu shell over the two implementations
struct Shell {
    mode: Mode,
    account: Option<Account>,
    functional: FunctionalSession,
}

impl Shell {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            account: None,
            functional: FunctionalSession {
                balance: Decimal::ZERO,
                overdraft_limit: Decimal::ZERO,
            },
        }
    }

    /// Run the menu loop until the user exits or input ends
    fn run(&mut self, input: &mut impl BufRead) -> Result<()> {
        println!("Welcome to the Bank Account Simulator!");
        println!("This application demonstrates two different implementation approaches:");
        println!("  - stateful (a mutable account entity with a transaction history)");
        println!("  - stateless (pure functions threading a balance value)");

        loop {
            self.display_menu();
            let choice = match prompt(input, "\nEnter your choice (1-7): ")? {
                Some(choice) => choice,
                None => break,
            };
            match choice.as_str() {
                "1" => self.create_account(input)?,
                "2" => self.make_deposit(input)?,
                "3" => self.make_withdrawal(input)?,
                "4" => self.check_balance(),
                "5" => self.view_transaction_history(),
                "6" => self.switch_mode(),
                "7" => {
                    println!("Thank you for using the Bank Account Simulator!");
                    break;
                }
                _ => println!("Invalid choice. Please try again."),
            }
        }
        Ok(())
    }

    fn display_menu(&self) {
        println!("\n===== Bank Account Simulator =====");
        println!("Current mode: {}", self.mode.label());
        let balance = match self.mode {
            Mode::Stateful => self
                .account
                .as_ref()
                .map(Account::balance)
                .unwrap_or(Decimal::ZERO),
            Mode::Stateless => stateless::balance(self.functional.balance),
        };
        println!("Current balance: ${balance:.2}");
        println!("\nOptions:");
        println!("1. Create new account");
        println!("2. Make a deposit");
        println!("3. Make a withdrawal");
        println!("4. Check balance");
        println!("5. View transaction history (stateful mode only)");
        println!("6. Switch mode (stateful/stateless)");
        println!("7. Exit");
    }

    fn create_account(&mut self, input: &mut impl BufRead) -> Result<()> {
        let initial_balance = match prompt_amount(input, "Enter initial balance: $")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        let overdraft_limit = match prompt_amount(input, "Enter overdraft limit (0 for none): $")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        match self.mode {
            Mode::Stateful => match Account::new(initial_balance, overdraft_limit) {
                Ok(account) => {
                    println!("Account created with balance: ${:.2}", account.balance());
                    self.account = Some(account);
                }
                Err(e) => println!("Error: {e}"),
            },
            Mode::Stateless => {
                if initial_balance < Decimal::ZERO {
                    println!("Error: initial balance cannot be negative");
                    return Ok(());
                }
                // the pure withdraw function expects a non-negative limit,
                // so clamp before it is threaded through
                self.functional = FunctionalSession {
                    balance: initial_balance,
                    overdraft_limit: overdraft_limit.max(Decimal::ZERO),
                };
                println!("Account created with balance: ${initial_balance:.2}");
            }
        }
        Ok(())
    }

    fn make_deposit(&mut self, input: &mut impl BufRead) -> Result<()> {
        if !self.require_session() {
            return Ok(());
        }
        let amount = match prompt_amount(input, "Enter deposit amount: $")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        if let Some(session) = self.session() {
            match session.deposit(amount) {
                Ok(new_balance) => println!("Deposit successful. New balance: ${new_balance:.2}"),
                Err(e) => println!("Error: {e}"),
            }
        }
        Ok(())
    }

    fn make_withdrawal(&mut self, input: &mut impl BufRead) -> Result<()> {
        if !self.require_session() {
            return Ok(());
        }
        let amount = match prompt_amount(input, "Enter withdrawal amount: $")? {
            Some(amount) => amount,
            None => return Ok(()),
        };
        if let Some(session) = self.session() {
            match session.withdraw(amount) {
                Ok(new_balance) => {
                    println!("Withdrawal successful. New balance: ${new_balance:.2}")
                }
                Err(e) => println!("Error: {e}"),
            }
        }
        Ok(())
    }

    fn check_balance(&mut self) {
        if !self.require_session() {
            return;
        }
        if let Some(session) = self.session() {
            println!("Current balance: ${:.2}", session.balance());
        }
    }

    fn view_transaction_history(&self) {
        if self.mode != Mode::Stateful {
            println!("Transaction history is only available in stateful mode.");
            return;
        }
        let account = match &self.account {
            Some(account) => account,
            None => {
                println!("Please create an account first (option 1).");
                return;
            }
        };
        let history = account.transaction_history();
        if history.is_empty() {
            println!("No transactions recorded yet.");
            return;
        }
        println!("\n===== Transaction History =====");
        for (i, tx) in history.iter().enumerate() {
            println!("Transaction #{}:", i + 1);
            println!("  Type: {}", tx.kind);
            println!("  Amount: ${:.2}", tx.amount);
            println!("  Date: {}", tx.timestamp.format("%Y-%m-%d %H:%M:%S"));
            println!("  Resulting balance: ${:.2}", tx.resulting_balance);
            println!();
        }
        println!("Total transactions: {}", history.len());
    }

    /// Switch implementations, copying the current balance and overdraft
    /// limit across so both modes agree on the session state
    fn switch_mode(&mut self) {
        match self.mode {
            Mode::Stateful => {
                if let Some(account) = &self.account {
                    self.functional = FunctionalSession {
                        balance: account.balance(),
                        overdraft_limit: account.overdraft_limit(),
                    };
                }
                self.mode = Mode::Stateless;
                println!("Switched to functional (stateless) mode.");
            }
            Mode::Stateless => {
                // a balance already in overdraft cannot seed a fresh account,
                // so the mode is left unchanged on failure
                match Account::new(self.functional.balance, self.functional.overdraft_limit) {
                    Ok(account) => {
                        self.account = Some(account);
                        self.mode = Mode::Stateful;
                        println!("Switched to OOP (stateful) mode.");
                    }
                    Err(e) => println!("Error: cannot switch to stateful mode: {e}"),
                }
            }
        }
    }

    /// The implementation currently driven by the shell, if usable
    fn session(&mut self) -> Option<&mut dyn AccountOps> {
        match self.mode {
            Mode::Stateful => match &mut self.account {
                Some(account) => Some(account as &mut dyn AccountOps),
                None => None,
            },
            Mode::Stateless => Some(&mut self.functional as &mut dyn AccountOps),
        }
    }

    fn require_session(&self) -> bool {
        if self.mode == Mode::Stateful && self.account.is_none() {
            println!("Please create an account first (option 1).");
            return false;
        }
        true
    }
}

/// Prompt for a line of input; `None` means end of input
fn prompt(input: &mut impl BufRead, message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a decimal amount; `None` on end of input or an unparseable
/// value (already reported to the user)
fn prompt_amount(input: &mut impl BufRead, message: &str) -> Result<Option<Decimal>> {
    let text = match prompt(input, message)? {
        Some(text) => text,
        None => return Ok(None),
    };
    match text.parse::<Decimal>() {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            println!("Error: `{text}` is not a valid amount");
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let stdin = io::stdin();
    let mut shell = Shell::new(args.mode.unwrap_or(Mode::Stateful));
    shell.run(&mut stdin.lock())
}
