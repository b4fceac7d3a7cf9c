//! Integration tests for the batch invoker, run against an in-process aggregator.

mod integration_tests {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc, Mutex,
        },
    };

    use alloy::{
        eips::{BlockId, BlockNumberOrTag},
        primitives::{address, Address, Bytes, U256},
        sol_types::SolCall,
    };
    use alloy_dyn_abi::DynSolValue;
    use async_trait::async_trait;
    use batchcall_common::{
        constants::{DEFAULT_MULTICALL_ADDRESS, DEFAULT_STATIC_CALL_GAS_REQUIRED},
        ether::provider::EthCall,
    };
    use batchcall_multicall::{
        erc20_interface, resolve_function, AggregatedRequest, BatchInvoker, CallTarget, Error,
        ReturnValue, UniswapInterfaceMulticall,
    };

    const AAVE: Address = address!("D6DF932A45C0f255f85145f286eA0b292B21C90B");
    const DAI: Address = address!("8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063");
    const USDT: Address = address!("c2132D05D31c914a87C6611C10748AEb04B58e8F");
    const WBTC: Address = address!("1BFD67037B42Cf73acF2047067bd4F2C47D9BfD6");
    const WMATIC: Address = address!("0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270");
    const NO_CODE: Address = address!("000000000000000000000000000000000000dEaD");
    const REVERTS: Address = address!("00000000000000000000000000000000DeaDBeef");
    const HOLDER: Address = address!("1F98415757620B543A52E61c46B32eB19261F984");

    const DECIMALS_SELECTOR: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
    const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

    #[derive(Debug, Clone, Copy)]
    enum Contract {
        Token { decimals: u8, balance: u64 },
        Reverting,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Mode {
        Honest,
        Unreachable,
        Garbage,
        DropLastResult,
    }

    /// A chain with a handful of ERC-20 tokens and an aggregator at the default address.
    #[derive(Debug, Clone)]
    struct MockChain {
        contracts: HashMap<Address, Contract>,
        latest_block: u64,
        mode: Mode,
        calls: Arc<AtomicUsize>,
        gas_limits: Arc<Mutex<Vec<U256>>>,
    }

    impl MockChain {
        fn new() -> Self {
            let contracts = HashMap::from([
                (AAVE, Contract::Token { decimals: 18, balance: 1 }),
                (DAI, Contract::Token { decimals: 18, balance: 2 }),
                (USDT, Contract::Token { decimals: 6, balance: 3 }),
                (WBTC, Contract::Token { decimals: 8, balance: 4 }),
                (WMATIC, Contract::Token { decimals: 18, balance: 5 }),
                (REVERTS, Contract::Reverting),
            ]);

            Self {
                contracts,
                latest_block: 50_000_000,
                mode: Mode::Honest,
                calls: Arc::default(),
                gas_limits: Arc::default(),
            }
        }

        fn with_mode(mut self, mode: Mode) -> Self {
            self.mode = mode;
            self
        }

        fn call_count(&self) -> Arc<AtomicUsize> {
            self.calls.clone()
        }

        /// The gas limit of every sub-call the aggregator has received.
        fn gas_limits(&self) -> Arc<Mutex<Vec<U256>>> {
            self.gas_limits.clone()
        }

        /// Execute a call against `target`, returning the success flag and the return data.
        fn execute(&self, target: Address, data: &[u8]) -> (bool, Bytes) {
            match self.contracts.get(&target) {
                // accounts without code succeed with no return data
                None => (true, Bytes::new()),
                Some(Contract::Reverting) => (false, Bytes::new()),
                Some(Contract::Token { decimals, balance }) => {
                    if data.starts_with(&DECIMALS_SELECTOR) {
                        (true, word(U256::from(*decimals)))
                    } else if data.starts_with(&BALANCE_OF_SELECTOR) && data.len() == 36 {
                        // the balance depends on the holder so arguments are observable
                        let holder = Address::from_slice(&data[16..36]);
                        let balance = if holder == HOLDER { *balance } else { 0 };
                        (true, word(U256::from(balance)))
                    } else {
                        (false, Bytes::new())
                    }
                }
            }
        }

        fn block_number(&self, block: Option<BlockId>) -> u64 {
            match block {
                Some(BlockId::Number(BlockNumberOrTag::Number(number))) => number,
                _ => self.latest_block,
            }
        }
    }

    fn word(value: U256) -> Bytes {
        Bytes::from(value.to_be_bytes::<32>().to_vec())
    }

    #[async_trait]
    impl EthCall for MockChain {
        async fn eth_call(
            &self,
            to: Address,
            input: Bytes,
            block: Option<BlockId>,
        ) -> eyre::Result<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.mode == Mode::Unreachable {
                return Err(eyre::eyre!("error sending request: connection refused"));
            }

            if to != DEFAULT_MULTICALL_ADDRESS {
                let (success, output) = self.execute(to, &input);
                if !success {
                    return Err(eyre::eyre!("execution reverted"));
                }
                return Ok(output);
            }

            if self.mode == Mode::Garbage {
                return Ok(Bytes::from(vec![0xde, 0xad]));
            }

            let request = UniswapInterfaceMulticall::multicallCall::abi_decode(&input)?;
            self.gas_limits
                .lock()
                .map_err(|_| eyre::eyre!("gas limit log poisoned"))?
                .extend(request.calls.iter().map(|call| call.gasLimit));
            let mut results = request
                .calls
                .iter()
                .map(|call| {
                    let (success, output) = self.execute(call.target, &call.callData);
                    DynSolValue::Tuple(vec![
                        DynSolValue::Bool(success),
                        DynSolValue::Uint(U256::from(2_400), 256),
                        DynSolValue::Bytes(output.to_vec()),
                    ])
                })
                .collect::<Vec<_>>();

            if self.mode == Mode::DropLastResult {
                results.pop();
            }

            let response = DynSolValue::Tuple(vec![
                DynSolValue::Uint(U256::from(self.block_number(block)), 256),
                DynSolValue::Array(results),
            ]);

            Ok(response.abi_encode_params().into())
        }
    }

    fn invoker(chain: MockChain) -> BatchInvoker<MockChain> {
        BatchInvoker::new(chain, DEFAULT_MULTICALL_ADDRESS)
    }

    fn decimals_of(value: &ReturnValue) -> Option<u64> {
        match value {
            ReturnValue::Decoded(values) => match values.first() {
                Some(DynSolValue::Uint(value, _)) => u64::try_from(*value).ok(),
                _ => None,
            },
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_decimals_of_polygon_tokens() {
        let interface = erc20_interface().expect("failed to build interface");
        let targets = [AAVE, DAI, USDT, WBTC, WMATIC];

        let response = invoker(MockChain::new())
            .invoke(&targets, &interface, "decimals")
            .await
            .expect("multicall failed");

        assert_eq!(response.len(), targets.len());
        assert_eq!(response.block_number, U256::from(50_000_000));
        assert_eq!(response.succeeded(), 5);

        let decimals = response.iter().map(|result| decimals_of(&result.value)).collect::<Vec<_>>();
        assert_eq!(decimals, vec![Some(18), Some(18), Some(6), Some(8), Some(18)]);
    }

    #[tokio::test]
    async fn test_results_follow_submission_order() {
        let interface = erc20_interface().expect("failed to build interface");
        let targets = [WBTC, USDT, DAI, WBTC];

        let response = invoker(MockChain::new())
            .invoke(&targets, &interface, "decimals")
            .await
            .expect("multicall failed");

        let returned = response.iter().map(|result| result.target).collect::<Vec<_>>();
        assert_eq!(returned, targets.to_vec());

        let decimals = response.iter().map(|result| decimals_of(&result.value)).collect::<Vec<_>>();
        assert_eq!(decimals, vec![Some(8), Some(6), Some(18), Some(8)]);
    }

    #[tokio::test]
    async fn test_target_without_code_fails_alone() {
        let interface = erc20_interface().expect("failed to build interface");
        let targets = [DAI, NO_CODE, WMATIC];

        let response = invoker(MockChain::new())
            .invoke(&targets, &interface, "decimals")
            .await
            .expect("one bad target must not fail the batch");

        assert_eq!(response.len(), 3);
        assert!(response.results[0].success);
        assert!(!response.results[1].success);
        assert!(matches!(response.results[1].value, ReturnValue::Malformed(_)));
        assert!(response.results[2].success);
        assert_eq!(decimals_of(&response.results[0].value), Some(18));
        assert_eq!(decimals_of(&response.results[2].value), Some(18));
    }

    #[tokio::test]
    async fn test_reverting_target_fails_alone() {
        let interface = erc20_interface().expect("failed to build interface");

        let response = invoker(MockChain::new())
            .invoke(&[REVERTS, USDT], &interface, "decimals")
            .await
            .expect("multicall failed");

        assert!(!response.results[0].success);
        assert_eq!(response.results[0].value, ReturnValue::Reverted);
        assert_eq!(decimals_of(&response.results[1].value), Some(6));
        assert_eq!(response.succeeded(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch_never_reaches_the_network() {
        let interface = erc20_interface().expect("failed to build interface");
        let chain = MockChain::new();
        let calls = chain.call_count();

        let result = invoker(chain).invoke(&[], &interface, "decimals").await;

        assert!(matches!(result, Err(Error::EmptyBatch)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_batch_is_a_single_round_trip() {
        let interface = erc20_interface().expect("failed to build interface");
        let chain = MockChain::new();
        let calls = chain.call_count();

        invoker(chain)
            .invoke(&[AAVE, DAI, USDT, WBTC, WMATIC], &interface, "decimals")
            .await
            .expect("multicall failed");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_target_matches_direct_call() {
        let interface = erc20_interface().expect("failed to build interface");
        let function = resolve_function(&interface, "decimals", 0).expect("decimals exists");
        let invoker = invoker(MockChain::new());

        let call = CallTarget::new(USDT, function, &[]).expect("failed to encode call");
        let direct = invoker.call_direct(&call, function).await.expect("direct call failed");

        let request = AggregatedRequest::new(vec![call]).expect("non-empty request");
        let batched = invoker.invoke_request(&request, function).await.expect("multicall failed");

        assert_eq!(batched.results[0].decoded(), Some(direct.as_slice()));
    }

    #[tokio::test]
    async fn test_pinned_block_is_idempotent() {
        let interface = erc20_interface().expect("failed to build interface");
        let invoker = invoker(MockChain::new()).at_block(BlockId::number(40_000_000));

        let first = invoker
            .invoke(&[DAI, NO_CODE, USDT], &interface, "decimals")
            .await
            .expect("multicall failed");
        let second = invoker
            .invoke(&[DAI, NO_CODE, USDT], &interface, "decimals")
            .await
            .expect("multicall failed");

        assert_eq!(first, second);
        assert_eq!(first.block_number, U256::from(40_000_000));
    }

    #[tokio::test]
    async fn test_shared_arguments() {
        let interface = erc20_interface().expect("failed to build interface");

        let response = invoker(MockChain::new())
            .invoke_with_args(
                &[AAVE, DAI, NO_CODE],
                &interface,
                "balanceOf",
                &[DynSolValue::Address(HOLDER)],
            )
            .await
            .expect("multicall failed");

        assert_eq!(response.results[0].first(), Some(&DynSolValue::Uint(U256::from(1), 256)));
        assert_eq!(response.results[1].first(), Some(&DynSolValue::Uint(U256::from(2), 256)));
        assert!(!response.results[2].success);
    }

    #[tokio::test]
    async fn test_invalid_arguments_fail_before_the_network() {
        let interface = erc20_interface().expect("failed to build interface");
        let chain = MockChain::new();
        let calls = chain.call_count();

        let result = invoker(chain)
            .invoke_with_args(&[DAI], &interface, "balanceOf", &[DynSolValue::Bool(true)])
            .await;

        assert!(matches!(result, Err(Error::InvalidArguments { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gas_limit_is_forwarded() {
        let interface = erc20_interface().expect("failed to build interface");
        let chain = MockChain::new();
        let gas_limits = chain.gas_limits();
        let invoker = invoker(chain).with_gas_limit(30_000);

        assert_eq!(invoker.gas_limit(), 30_000);
        assert_eq!(invoker.aggregator(), DEFAULT_MULTICALL_ADDRESS);

        invoker.invoke(&[DAI, USDT], &interface, "decimals").await.expect("multicall failed");

        let forwarded = gas_limits.lock().expect("gas limit log poisoned").clone();
        assert_eq!(forwarded, vec![U256::from(30_000); 2]);
    }

    #[tokio::test]
    async fn test_default_gas_limit_is_forwarded() {
        let interface = erc20_interface().expect("failed to build interface");
        let chain = MockChain::new();
        let gas_limits = chain.gas_limits();

        invoker(chain)
            .invoke(&[AAVE, WBTC, WMATIC], &interface, "decimals")
            .await
            .expect("multicall failed");

        let forwarded = gas_limits.lock().expect("gas limit log poisoned").clone();
        assert_eq!(forwarded, vec![U256::from(DEFAULT_STATIC_CALL_GAS_REQUIRED); 3]);
    }

    #[tokio::test]
    async fn test_zero_gas_limit_fails_before_the_network() {
        let interface = erc20_interface().expect("failed to build interface");
        let chain = MockChain::new();
        let calls = chain.call_count();

        let result = invoker(chain).with_gas_limit(0).invoke(&[DAI], &interface, "decimals").await;

        assert!(matches!(result, Err(Error::ZeroGasLimit)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        let interface = erc20_interface().expect("failed to build interface");

        let result = invoker(MockChain::new().with_mode(Mode::Unreachable))
            .invoke(&[DAI], &interface, "decimals")
            .await;

        assert!(matches!(result, Err(Error::RpcError(_))));
    }

    #[tokio::test]
    async fn test_undecodable_aggregator_response() {
        let interface = erc20_interface().expect("failed to build interface");

        let result = invoker(MockChain::new().with_mode(Mode::Garbage))
            .invoke(&[DAI], &interface, "decimals")
            .await;

        assert!(matches!(result, Err(Error::DecodeError(_))));
    }

    #[tokio::test]
    async fn test_result_count_mismatch() {
        let interface = erc20_interface().expect("failed to build interface");

        let result = invoker(MockChain::new().with_mode(Mode::DropLastResult))
            .invoke(&[DAI, USDT], &interface, "decimals")
            .await;

        assert!(matches!(result, Err(Error::LengthMismatch { expected: 2, found: 1 })));
    }
}
