//! The HSBC cash machine: locked behind a PIN pieced together from bins,
//! then a plain bank/cash transfer menu.

use bevy::prelude::*;
use crate::shared::*;

const SPEAKER: &str = "HSBC ATM";

pub fn use_cash_machine(session: &Session) -> Outcome {
    if session.atm_unlocked {
        banking_menu(session)
    } else {
        pin_prompt(session)
    }
}

/// Offers the digits recovered so far. Unknown digits show as `?` and can
/// never match.
fn pin_prompt(session: &Session) -> Outcome {
    let entered = session.secret_code;
    Outcome::choice(ChoicePrompt::new(
        "Enter PIN?",
        vec![format!("Enter {}", entered.display()), "Cancel".into()],
        move |index, session| {
            if index != 0 {
                return Outcome::free_roam();
            }
            match unlock(session, &entered) {
                Ok(()) => Outcome::dialogue(SPEAKER, "Access Granted. Welcome valued customer."),
                Err(err) => Outcome::free_roam().with_toast(err.to_string()),
            }
        },
    ))
}

fn banking_menu(session: &Session) -> Outcome {
    Outcome::choice(ChoicePrompt::new(
        format!("Bank Balance: ${}. Select Action:", session.bank_balance),
        vec![
            format!("Withdraw ${}", ATM_WITHDRAW_AMOUNT),
            "Deposit All Cash".into(),
            "Close".into(),
        ],
        |index, session| match index {
            0 => match withdraw(session) {
                Ok(()) => Outcome::dialogue(
                    SPEAKER,
                    format!("Transaction Successful. Withdrew ${}.", ATM_WITHDRAW_AMOUNT),
                ),
                Err(err) => Outcome::dialogue(SPEAKER, err.to_string()),
            },
            1 => {
                deposit_all(session);
                Outcome::dialogue(SPEAKER, "Transaction Successful. Deposited all cash.")
            }
            _ => Outcome::free_roam(),
        },
    ))
}

pub fn unlock(session: &mut Session, entered: &SecretCode) -> Result<(), TransactionError> {
    let matches = entered
        .0
        .iter()
        .zip(ATM_PIN.iter())
        .all(|(digit, expected)| *digit == Some(*expected));
    if !matches {
        info!("[Economy] Wrong PIN {}", entered.display());
        return Err(TransactionError::IncorrectPin);
    }
    session.atm_unlocked = true;
    info!("[Economy] Cash machine unlocked");
    Ok(())
}

/// Moves a fixed amount from the bank to cash. Cash plus bank never changes.
pub fn withdraw(session: &mut Session) -> Result<(), TransactionError> {
    if session.bank_balance < ATM_WITHDRAW_AMOUNT {
        return Err(TransactionError::InsufficientBank);
    }
    session.bank_balance -= ATM_WITHDRAW_AMOUNT;
    session.cash = session.cash.saturating_add(ATM_WITHDRAW_AMOUNT);
    info!(
        "[Economy] Withdrew ${}: cash ${} bank ${}",
        ATM_WITHDRAW_AMOUNT, session.cash, session.bank_balance
    );
    Ok(())
}

/// Returns the amount deposited.
pub fn deposit_all(session: &mut Session) -> u32 {
    let amount = std::mem::take(&mut session.cash);
    session.bank_balance = session.bank_balance.saturating_add(amount);
    info!("[Economy] Deposited ${}, bank ${}", amount, session.bank_balance);
    amount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick(outcome: Outcome, index: usize, session: &mut Session) -> Outcome {
        match outcome.next {
            NextMode::Choice(prompt) => prompt.resolve(index, session),
            other => panic!("expected a choice, got {:?}", other),
        }
    }

    fn full_code() -> SecretCode {
        SecretCode([Some(0); SECRET_CODE_LEN])
    }

    #[test]
    fn test_withdraw_moves_money_without_creating_it() {
        let mut session = Session::default();
        let total = session.cash + session.bank_balance;

        withdraw(&mut session).unwrap();
        assert_eq!(session.bank_balance, 400);
        assert_eq!(session.cash, 200);
        assert_eq!(session.cash + session.bank_balance, total);
    }

    #[test]
    fn test_withdraw_needs_a_full_hundred() {
        let mut session = Session::default();
        session.bank_balance = 99;
        assert_eq!(withdraw(&mut session), Err(TransactionError::InsufficientBank));
        assert_eq!(session.bank_balance, 99);
        assert_eq!(session.cash, 100);
    }

    #[test]
    fn test_balances_saturate_instead_of_wrapping() {
        let mut session = Session::default();
        session.cash = u32::MAX - 10;
        withdraw(&mut session).unwrap();
        assert_eq!(session.cash, u32::MAX);

        session.bank_balance = u32::MAX - 5;
        assert_eq!(deposit_all(&mut session), u32::MAX);
        assert_eq!(session.bank_balance, u32::MAX);
        assert_eq!(session.cash, 0);
    }

    #[test]
    fn test_partial_code_is_an_incorrect_pin() {
        let mut session = Session::default();
        session.secret_code.reveal(0, 0);

        let outcome = pick(use_cash_machine(&session), 0, &mut session);
        assert!(matches!(outcome.next, NextMode::FreeRoam));
        assert_eq!(outcome.toast.as_deref(), Some("Incorrect PIN."));
        assert!(!session.atm_unlocked);
    }

    #[test]
    fn test_full_code_unlocks_and_welcomes() {
        let mut session = Session::default();
        session.secret_code = full_code();

        match use_cash_machine(&session).next {
            NextMode::Choice(prompt) => {
                assert_eq!(prompt.options[0], "Enter 0000");
                let outcome = prompt.resolve(0, &mut session);
                match outcome.next {
                    NextMode::Dialogue(line) => {
                        assert_eq!(line.text, "Access Granted. Welcome valued customer.")
                    }
                    other => panic!("expected dialogue, got {:?}", other),
                }
            }
            other => panic!("expected a choice, got {:?}", other),
        }
        assert!(session.atm_unlocked);
    }

    #[test]
    fn test_unlocked_menu_withdraws_and_deposits() {
        let mut session = Session::default();
        session.atm_unlocked = true;

        let outcome = pick(use_cash_machine(&session), 0, &mut session);
        assert!(matches!(outcome.next, NextMode::Dialogue(_)));
        assert_eq!((session.cash, session.bank_balance), (200, 400));

        pick(use_cash_machine(&session), 1, &mut session);
        assert_eq!((session.cash, session.bank_balance), (0, 600));

        let outcome = pick(use_cash_machine(&session), 2, &mut session);
        assert!(matches!(outcome.next, NextMode::FreeRoam));
    }

    #[test]
    fn test_menu_title_shows_balance() {
        let mut session = Session::default();
        session.atm_unlocked = true;
        match use_cash_machine(&session).next {
            NextMode::Choice(prompt) => {
                assert_eq!(prompt.title, "Bank Balance: $500. Select Action:");
                assert_eq!(prompt.options.len(), 3);
            }
            other => panic!("expected a choice, got {:?}", other),
        }
    }
}
