use alloy::sol;

sol! {
    /// The aggregator contract. Deployed at the same address on Ethereum, Polygon, Optimism and
    /// Arbitrum; see [`batchcall_common::constants::DEFAULT_MULTICALL_ADDRESS`].
    ///
    /// Unlike Multicall3, every sub-call carries its own gas limit and reports the gas it used.
    #[sol(all_derives)]
    interface UniswapInterfaceMulticall {
        struct Call {
            address target;
            uint256 gasLimit;
            bytes callData;
        }

        struct Result {
            bool success;
            uint256 gasUsed;
            bytes returnData;
        }

        function multicall(Call[] memory calls) public returns (uint256 blockNumber, Result[] memory returnData);
    }
}
